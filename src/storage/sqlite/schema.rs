//! Diesel schema for contact and message persistence.

diesel::table! {
    /// Contact rows.
    contacts (id) {
        /// Store-assigned contact identifier.
        id -> BigInt,
        /// Display name.
        name -> Text,
        /// Phone number used to match inbound messages.
        phone -> Text,
        /// Optional email address.
        email -> Nullable<Text>,
        /// Optional postal address.
        address -> Nullable<Text>,
        /// Optional notes.
        notes -> Nullable<Text>,
        /// Optional avatar file path.
        avatar_path -> Nullable<Text>,
    }
}

diesel::table! {
    /// Message rows, one conversation per contact.
    messages (id) {
        /// Store-assigned message identifier.
        id -> BigInt,
        /// Owning contact.
        contact_id -> BigInt,
        /// Message text.
        body -> Text,
        /// Creation time in epoch milliseconds.
        timestamp_ms -> BigInt,
        /// `inbound` or `outbound`.
        direction -> Text,
    }
}

diesel::joinable!(messages -> contacts (contact_id));
diesel::allow_tables_to_appear_in_same_query!(contacts, messages);
