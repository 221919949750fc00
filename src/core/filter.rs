//! # Test Filter Module / 测试过滤器模块
//!
//! Execution filters select the tests each job runs. They render into test
//! runner arguments for the matrix and can also be evaluated against a test
//! descriptor, which is how the collection/uncollected partition is verified.
//!
//! 执行过滤器决定每个作业运行哪些测试。它们既可以渲染为矩阵中的测试运行器参数，
//! 也可以针对测试描述进行求值，用于验证集合/未收集作业的划分。

use std::fmt;

/// Trait name carrying a test's partition label.
pub const PARTITION_TRAIT: &str = "Partition";

/// A single test as seen by the filters.
/// 过滤器视角下的单个测试。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDescriptor {
    pub class_name: String,
    pub partition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestFilter {
    /// Tests tagged with exactly this partition label.
    /// 带有该分区标签的测试。
    Trait { value: String },
    /// Tests tagged with none of these labels, including untagged tests.
    /// An empty list selects everything.
    ///
    /// 不带任何这些标签的测试（包括未标记的测试）。空列表表示选择全部。
    NotTraits { values: Vec<String> },
    /// Tests declared in this fully-qualified class.
    /// 在该完全限定类中声明的测试。
    Class { name: String },
}

impl TestFilter {
    /// The catch-all filter: the conjunction of "not in label" over every
    /// retained label.
    ///
    /// 兜底过滤器：对每个保留标签取“不属于该标签”的合取。
    pub fn uncollected<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TestFilter::NotTraits {
            values: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, test: &TestDescriptor) -> bool {
        match self {
            TestFilter::Trait { value } => test.partition.as_deref() == Some(value.as_str()),
            TestFilter::NotTraits { values } => values
                .iter()
                .all(|value| test.partition.as_deref() != Some(value.as_str())),
            TestFilter::Class { name } => test.class_name == *name,
        }
    }

    /// Renders the filter as test runner arguments.
    pub fn to_args(&self) -> String {
        match self {
            TestFilter::Trait { value } => {
                format!("--filter-trait \"{PARTITION_TRAIT}={value}\"")
            }
            TestFilter::NotTraits { values } => values
                .iter()
                .map(|value| format!("--filter-not-trait \"{PARTITION_TRAIT}={value}\""))
                .collect::<Vec<_>>()
                .join(" "),
            TestFilter::Class { name } => format!("--filter-class \"{name}\""),
        }
    }
}

impl fmt::Display for TestFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_args())
    }
}

/// Joins a filter with the project's own extra arguments.
/// 将过滤器与项目自身的额外参数拼接。
pub fn join_args(filter: &TestFilter, extra_test_args: &str) -> String {
    let filter = filter.to_args();
    match (filter.trim(), extra_test_args.trim()) {
        ("", extra) => extra.to_string(),
        (filter, "") => filter.to_string(),
        (filter, extra) => format!("{filter} {extra}"),
    }
}
