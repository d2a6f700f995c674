//! Test that resolution types can be shared across threads

fn assert_sync_send<T: Sync + Send>() {}

#[test]
fn test_dictionary_resolver_is_sync_send() {
    assert_sync_send::<spellcfg_core::DictionaryResolver>();
}

#[test]
fn test_canonical_settings_is_sync_send() {
    assert_sync_send::<spellcfg_core::CanonicalSettings>();
    assert_sync_send::<spellcfg_core::ResolvedSettings>();
}

#[test]
fn test_file_accessors_are_sync_send() {
    assert_sync_send::<spellcfg_core::TokioFileAccessor>();
    assert_sync_send::<spellcfg_core::MemoryFileAccessor>();
    assert_sync_send::<Box<dyn spellcfg_core::FileAccessor>>();
}

#[test]
fn test_errors_are_sync_send() {
    assert_sync_send::<spellcfg_core::SettingsError>();
    assert_sync_send::<spellcfg_core::AccessError>();
}
