//! End-to-end flow over a real store: import-style analysis, code
//! assignment, activation and persistence.

use std::collections::BTreeMap;

use rubrica_core::activate::activate;
use rubrica_core::code;
use rubrica_core::config::InitOptions;
use rubrica_core::model::{Criterion, Delivery, Evaluation, Level, Rubric, RubricType};
use rubrica_core::store::{RubricRepository, Store};
use rubrica_core::text::course_initials;
use rubrica_core::versioning::{analyze, Verdict};

fn sample_rubric(name: &str) -> Rubric {
    let mut rubric = Rubric::new(name, RubricType::Group, Delivery::First, "EPM");
    rubric.criteria = vec![
        Criterion {
            title: "Diseño".to_string(),
            weight: 40.0,
            levels: vec![Level {
                min_points: 0.0,
                max_points: 40.0,
                title: "Logrado".to_string(),
                description: String::new(),
            }],
        },
        Criterion {
            title: "Funcionalidad".to_string(),
            weight: 60.0,
            levels: vec![],
        },
    ];
    rubric
}

#[test]
fn full_version_lifecycle_over_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::init(dir.path(), InitOptions::default()).unwrap();

    // first save: fresh store, candidate is new, code gets assigned
    let mut set = store.load_rubrics().unwrap();
    let mut first = sample_rubric("Rúbrica Grupal E1 - Programación Móvil");
    let verdict = analyze(&first, &set.list(), None);
    assert!(matches!(verdict, Verdict::New));

    let initials = course_initials("Experiencia para Programación Móvil");
    let generated = code::generate(RubricType::Group, Delivery::First, &initials, set.codes());
    assert_eq!(generated.code, "RGE1-EPMV1");
    first.code = Some(generated.code);
    first.version = Some(generated.version);
    let first_id = first.id.clone();
    set.put(first);
    store.save_rubrics(&set).unwrap();

    // re-import of the same content under the same name is flagged
    let mut set = store.load_rubrics().unwrap();
    let duplicate = sample_rubric("rubrica grupal e1 - programacion movil");
    match analyze(&duplicate, &set.list(), None) {
        Verdict::IdenticalDuplicate { matched, .. } => assert_eq!(matched.id, first_id),
        other => panic!("expected identical duplicate, got {}", other.label()),
    }

    // a weight tweak under the same name becomes version 2
    let mut tweaked = sample_rubric("Rúbrica Grupal E1 - Programación Móvil");
    tweaked.criteria[0].weight = 45.0;
    tweaked.criteria[1].weight = 55.0;
    let next_version = match analyze(&tweaked, &set.list(), None) {
        Verdict::NewVersion {
            comparison,
            next_version,
            ..
        } => {
            assert_eq!(comparison.differences.len(), 2);
            next_version
        }
        other => panic!("expected new version, got {}", other.label()),
    };
    assert_eq!(next_version, 2);
    let generated = code::generate(RubricType::Group, Delivery::First, &initials, set.codes());
    assert_eq!(generated.version, next_version);
    assert_eq!(generated.code, "RGE1-EPMV2");
    tweaked.code = Some(generated.code);
    tweaked.version = Some(next_version);
    let second_id = tweaked.id.clone();
    set.put(tweaked);

    // activating V2 deactivates V1, idempotently
    let touched = activate(&mut set, &second_id).unwrap();
    assert_eq!(touched, 2);
    let touched_again = activate(&mut set, &second_id).unwrap();
    assert_eq!(touched_again, touched);
    store.save_rubrics(&set).unwrap();

    let reloaded = store.load_rubrics().unwrap();
    let active: Vec<_> = reloaded
        .list()
        .into_iter()
        .filter(|r| r.active)
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(active, vec![second_id]);
    assert!(!reloaded.get(&first_id).unwrap().active);
}

#[test]
fn evaluations_persist_under_composite_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::init(dir.path(), InitOptions::default()).unwrap();

    let rubric = sample_rubric("Rúbrica Grupal E1");
    let mut points = BTreeMap::new();
    points.insert("Diseño".to_string(), 35.0);
    points.insert("Funcionalidad".to_string(), 50.0);
    let eval = Evaluation::new(
        "EPM",
        Delivery::First,
        RubricType::Group,
        "Equipo 3",
        &rubric.id,
        points,
    );

    let mut evaluations = store.load_evaluations().unwrap();
    evaluations.insert(eval.key(), eval);
    store.save_evaluations(&evaluations).unwrap();

    let reloaded = store.load_evaluations().unwrap();
    let stored = reloaded.get("EPM|E1|Grupal|Equipo 3").unwrap();
    assert_eq!(stored.total, 85.0);
    assert_eq!(rubric.grade_label(stored.total), None); // no scale defined
}
