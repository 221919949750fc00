use criterion::{Criterion, criterion_group, criterion_main};
use matrix_splitter::core::listing::ClassNameMatcher;
use matrix_splitter::core::matrix::{MatrixBuilder, NamingRules, SplitProject};
use matrix_splitter::core::planner::plan_discovery;
use matrix_splitter::metadata::{GlobalDefaults, ProjectMetadata, resolve};
use matrix_splitter::models::TestListRecord;
use std::collections::BTreeSet;
use std::hint::black_box;

fn synthetic_projects(defaults: &GlobalDefaults) -> Vec<SplitProject> {
    (0..50)
        .map(|p| {
            let name = format!("Org.Project{p:02}.Tests");
            let record = if p % 2 == 0 {
                TestListRecord::Collection {
                    labels: (0..8).map(|l| format!("Label{l}")).collect(),
                }
            } else {
                TestListRecord::Class {
                    classes: (0..40).map(|c| format!("{name}.Class{c:03}")).collect(),
                }
            };
            let meta = ProjectMetadata {
                test_session_timeout: (p % 3 == 0).then(|| "30m".to_string()),
                ..Default::default()
            };
            SplitProject {
                record,
                metadata: resolve(&name, Some(&meta), defaults),
            }
        })
        .collect()
}

fn bench_matrix_build(c: &mut Criterion) {
    let defaults = GlobalDefaults::default();
    let naming = NamingRules::default();
    let projects = synthetic_projects(&defaults);
    let builder = MatrixBuilder::new(&defaults, &naming);

    c.bench_function("matrix_build", |b| {
        b.iter(|| {
            let matrix = builder.build(black_box(&projects), &[]);
            black_box(matrix.to_json_pretty())
        });
    });
}

fn bench_class_discovery(c: &mut Criterion) {
    let matcher = ClassNameMatcher::new("Org.Foo").unwrap();
    let listing: Vec<String> = (0..5_000)
        .map(|i| format!("Org.Foo.Class{:03}.Test{i}", i % 200))
        .collect();

    c.bench_function("class_discovery", |b| {
        b.iter(|| plan_discovery("Org.Foo.Tests", black_box(&listing), BTreeSet::new(), &[], &matcher))
    });
}

criterion_group!(benches, bench_matrix_build, bench_class_discovery);
criterion_main!(benches);
