use domain::{CallContext, Preferences, UnitSystem};
use prodmon_locale::{PhraseResolver, PreferenceResolver, phrases};
use prodmon_storage::{InMemoryLocalePhraseStore, InMemoryUserPreferenceStore, UserPreferenceRecord};
use std::sync::Arc;

fn ctx() -> CallContext {
    CallContext::new("corr-1", None)
}

#[tokio::test]
async fn phrases_fall_back_to_english_then_default() {
    let store = Arc::new(InMemoryLocalePhraseStore::new());
    store.insert_phrase("es", phrases::ROD_LIFT.id, "Bombeo Mecánico").expect("insert");
    store.insert_phrase("en", phrases::ESP.id, "Electric Submersible Pump").expect("insert");
    let resolver = PhraseResolver::new(store);

    let ids = phrases::ids(&[phrases::ROD_LIFT, phrases::ESP, phrases::GAS_LIFT]);
    let resolved = resolver.resolve(&ctx(), "es", &ids).await.expect("resolve");

    assert_eq!(resolved.text(phrases::ROD_LIFT), "Bombeo Mecánico");
    assert_eq!(resolved.text(phrases::ESP), "Electric Submersible Pump");
    assert_eq!(resolved.text(phrases::GAS_LIFT), "Gas Lift");
    assert_eq!(resolved.len(), 2);
}

#[tokio::test]
async fn empty_id_list_skips_store() {
    let resolver = PhraseResolver::new(Arc::new(InMemoryLocalePhraseStore::new()));
    let resolved = resolver
        .resolve(&CallContext::default(), "en", &[])
        .await
        .expect("resolve");
    assert!(resolved.is_empty());
}

#[tokio::test]
async fn preferences_use_store_then_defaults() {
    let store = Arc::new(InMemoryUserPreferenceStore::new());
    store
        .upsert_preferences(UserPreferenceRecord {
            user_id: "metric-user".to_string(),
            locale: "es".to_string(),
            unit_system: UnitSystem::Metric,
        })
        .expect("upsert");
    let resolver = PreferenceResolver::new(store, Preferences::default());

    let stored = resolver.resolve(&ctx(), Some("metric-user")).await;
    assert_eq!(stored.unit_system, UnitSystem::Metric);
    assert_eq!(stored.locale, "es");

    let unknown = resolver.resolve(&ctx(), Some("someone")).await;
    assert_eq!(unknown, Preferences::default());

    let anonymous = resolver.resolve(&ctx(), None).await;
    assert_eq!(anonymous.unit_system, UnitSystem::Imperial);

    let failed = resolver
        .resolve(&CallContext::default(), Some("metric-user"))
        .await;
    assert_eq!(failed, Preferences::default());
}
