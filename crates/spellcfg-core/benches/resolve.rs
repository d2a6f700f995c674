//! Benchmarks for the settings resolution hot paths.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use spellcfg_core::{
    CSpellUserSettings, CanonicalSettings, DictionaryResolver, SettingsLayer, SettingsTier,
    normalize, normalize_patterns, predefined_patterns, resolve_settings,
};

fn workspace_settings(dictionaries: usize) -> CSpellUserSettings {
    let mut custom = serde_json::Map::new();
    let mut definitions = Vec::new();
    for i in 0..dictionaries {
        let name = format!("dict-{}", i);
        custom.insert(name.clone(), json!(i % 3 != 0));
        definitions.push(json!({ "name": name, "path": format!("/dicts/{}.txt", i) }));
    }
    CSpellUserSettings::from_value(json!({
        "customDictionaries": custom,
        "dictionaryDefinitions": definitions,
        "customWorkspaceDictionaries": ["typescript", "rust"],
        "ignorePaths": ["dist/**", { "glob": "*.snap", "root": "${workspaceFolder}" }],
        "patterns": [{ "name": "ticket", "pattern": "/[A-Z]+-\\d+/g" }],
    }))
    .expect("valid bench settings")
}

fn bench_normalize(c: &mut Criterion) {
    let settings = workspace_settings(16);
    c.bench_function("normalize", |b| b.iter(|| normalize(black_box(&settings))));
}

fn bench_resolve_dictionaries(c: &mut Criterion) {
    let resolver = DictionaryResolver::new();

    let mut group = c.benchmark_group("resolve_dictionaries");
    for size in [4usize, 32, 256] {
        let canonical = CanonicalSettings::from_settings(&workspace_settings(size));
        group.bench_with_input(BenchmarkId::new("entries", size), &canonical, |b, s| {
            b.iter(|| resolver.resolve(black_box(s)))
        });
    }
    group.finish();
}

fn bench_normalize_patterns(c: &mut Criterion) {
    let settings = workspace_settings(4);
    let predefined = predefined_patterns();
    c.bench_function("normalize_patterns", |b| {
        b.iter(|| normalize_patterns(black_box(&settings), black_box(&predefined)))
    });
}

fn bench_resolve_settings(c: &mut Criterion) {
    let defaults = SettingsLayer::defaults().expect("catalog defaults");
    let workspace = SettingsLayer::new(SettingsTier::Workspace, workspace_settings(32));

    c.bench_function("resolve_settings/default+workspace", |b| {
        b.iter(|| resolve_settings(black_box(vec![defaults.clone(), workspace.clone()])))
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_resolve_dictionaries,
    bench_normalize_patterns,
    bench_resolve_settings,
);
criterion_main!(benches);
