//! Diesel schema for the account directory.

diesel::table! {
    /// User accounts table.
    ///
    /// The `id` column is the primary key (UUID v4). `user_name` carries a
    /// unique index which arbitrates concurrent inserts and renames.
    user_accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique sign-in name (max 32 characters).
        user_name -> Varchar,
        /// Contact email address; not unique.
        email -> Varchar,
        /// Free-form identity-document reference.
        id_card -> Varchar,
        /// Date of birth.
        birth_date -> Date,
        /// Encoded password hash (PHC string).
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
