//! # Partition Property Tests / 分区属性测试
//!
//! Every test must be selected by exactly one job of a collection-mode project,
//! and discovery must be deterministic for a given listing and skip list.
//!
//! 集合模式项目中的每个测试必须恰好被一个作业选中；对给定的列表与跳过列表，发现结果必须确定。

use matrix_splitter::core::filter::{TestDescriptor, TestFilter};
use matrix_splitter::core::listing::ClassNameMatcher;
use matrix_splitter::core::planner::plan_discovery;
use matrix_splitter::models::TestListRecord;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn label() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,6}"
}

proptest! {
    #[test]
    fn every_test_matches_exactly_one_job(
        retained in prop::collection::btree_set(label(), 0..6),
        partitions in prop::collection::vec(prop::option::of(label()), 0..40),
    ) {
        let mut filters: Vec<TestFilter> = retained
            .iter()
            .map(|value| TestFilter::Trait { value: value.clone() })
            .collect();
        filters.push(TestFilter::uncollected(retained.iter().cloned()));

        for (index, partition) in partitions.into_iter().enumerate() {
            let test = TestDescriptor {
                class_name: format!("Org.Foo.Class{index}"),
                partition,
            };
            let hits = filters.iter().filter(|f| f.matches(&test)).count();
            prop_assert_eq!(hits, 1, "test {:?} matched {} jobs", test, hits);
        }
    }

    #[test]
    fn discovery_is_deterministic(
        labels in prop::collection::btree_set(label(), 0..6),
        skip in prop::collection::vec(label(), 0..4),
        classes in prop::collection::vec("[A-Z][a-z]{1,5}", 1..10),
    ) {
        let matcher = ClassNameMatcher::new("Org.Foo").unwrap();
        let listing: Vec<String> = classes
            .iter()
            .map(|class| format!("Org.Foo.{class}.Test"))
            .collect();

        let first = plan_discovery("P", &listing, labels.clone(), &skip, &matcher).unwrap();
        let second = plan_discovery("P", &listing, labels.clone(), &skip, &matcher).unwrap();
        prop_assert_eq!(&first, &second);

        let retained: BTreeSet<String> = labels
            .into_iter()
            .filter(|label| !skip.contains(label))
            .collect();
        match first {
            TestListRecord::Collection { labels } => prop_assert_eq!(labels, retained),
            TestListRecord::Class { classes: found } => {
                prop_assert!(retained.is_empty());
                prop_assert_eq!(found.len(), classes.iter().collect::<BTreeSet<_>>().len());
            }
        }
    }
}
