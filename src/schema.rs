table! {
    appointment_types (id) {
        id -> Unsigned<Bigint>,
        tenant_id -> Char,
        name -> Varchar,
        code -> Varchar,
        description -> Nullable<Text>,
        duration_default -> Unsigned<Integer>,
        base_consultation_fee -> Decimal,
        is_active -> Bool,
        color -> Char,
        created_at -> Datetime,
        updated_at -> Datetime,
    }
}
