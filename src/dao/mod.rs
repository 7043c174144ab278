/// Key-value backends holding the persisted preferences.
pub mod preference_store;
/// Typed access to the persisted wheel names and theme.
pub mod preferences;
/// Storage abstraction layer errors.
pub mod storage;
