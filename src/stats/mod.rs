//! 成绩统计引擎
//!
//! summarize 是纯函数：只读输入、无副作用、输出与输入顺序无关，
//! 可以在任意线程上并发调用。
//!
//! 阈值与分布边界全部用整数比较（10 * score 对 n * max_score），
//! 恰好落在 60% 满分的分数计入及格，不受浮点舍入影响。

use crate::models::assignments::stats_responses::AssignmentStats;
use crate::models::submissions::entities::Submission;

/// 对一份提交集合计算汇总统计
pub fn summarize(submissions: &[Submission], max_score: i64) -> AssignmentStats {
    let total = submissions.len() as i64;

    let scores: Vec<i64> = submissions
        .iter()
        .filter(|s| s.is_graded())
        .filter_map(|s| s.score)
        .collect();
    let graded_count = scores.len() as i64;

    if graded_count == 0 {
        return AssignmentStats::empty(total);
    }

    let sum: i64 = scores.iter().sum();
    let avg_score = sum as f64 / graded_count as f64;
    let max_observed = scores.iter().copied().max().unwrap_or(0);
    let min_observed = scores.iter().copied().min().unwrap_or(0);

    // 及格阈值为满分的 60%，含边界
    let passed = scores.iter().filter(|&&s| 10 * s >= 6 * max_score).count() as i64;
    let pass_rate = 100.0 * passed as f64 / graded_count as f64;

    let mut distribution = [0i64; 5];
    for &score in &scores {
        distribution[bucket_of(score, max_score)] += 1;
    }

    AssignmentStats {
        avg_score,
        max_observed,
        min_observed,
        pass_rate,
        distribution,
        graded_count,
        total,
    }
}

/// 自上而下匹配五个互斥区间，返回首个命中的桶下标
fn bucket_of(score: i64, max_score: i64) -> usize {
    if 10 * score >= 9 * max_score {
        0 // 优秀
    } else if 10 * score >= 8 * max_score {
        1 // 良好
    } else if 10 * score >= 7 * max_score {
        2 // 中等
    } else if 10 * score >= 6 * max_score {
        3 // 及格
    } else {
        4 // 不及格
    }
}
