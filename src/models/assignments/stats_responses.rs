use serde::Serialize;

/// 分数分布桶数量（优秀 / 良好 / 中等 / 及格 / 不及格）
pub const DISTRIBUTION_BUCKETS: usize = 5;

/// 作业成绩统计
///
/// 由 stats::summarize 纯函数计算；avg_score 与 pass_rate 保存精确值，
/// 展示层自行决定保留几位小数。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssignmentStats {
    // 已评分提交的平均分（精确值）
    pub avg_score: f64,
    // 观测到的最高分
    pub max_observed: i64,
    // 观测到的最低分
    pub min_observed: i64,
    // 及格率（百分比，阈值为满分的 60%，含边界）
    pub pass_rate: f64,
    // 分数分布，五个互斥且穷尽的区间
    pub distribution: [i64; DISTRIBUTION_BUCKETS],
    // 已评分提交数
    pub graded_count: i64,
    // 提交总数
    pub total: i64,
}

impl AssignmentStats {
    /// 无任何已评分提交时的统计
    pub fn empty(total: i64) -> Self {
        Self {
            avg_score: 0.0,
            max_observed: 0,
            min_observed: 0,
            pass_rate: 0.0,
            distribution: [0; DISTRIBUTION_BUCKETS],
            graded_count: 0,
            total,
        }
    }
}
