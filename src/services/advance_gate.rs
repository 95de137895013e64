//! 跳转闸门 - 业务能力层
//!
//! 串行化"跳到下一项"的请求。跳转是有副作用且可能很慢的页面切换，
//! 没有锁和冷却的话，同一个视频的多路完成信号（原生结束事件、
//! 结尾容差检查、下一轮重新分类）会连续触发跳转，一口气跳过多项。

use std::time::{Duration, Instant};

use tracing::{debug, info};

/// 跳转闸门
///
/// 职责：
/// - 决定一次跳转请求是否放行
/// - 不执行点击，放行后由调用方恰好点击一次
/// - 锁在冷却时间结束后自动失效
pub struct AdvanceGate {
    cooldown: Duration,
    in_flight: bool,
    last_grant: Option<Instant>,
}

impl AdvanceGate {
    /// 创建新的跳转闸门
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            in_flight: false,
            last_grant: None,
        }
    }

    /// 请求一次跳转，返回是否放行
    pub fn request(&mut self, reason: &str) -> bool {
        self.request_at(Instant::now(), reason)
    }

    /// 当前是否有跳转在途（锁被持有且未过冷却期）
    pub fn is_locked(&self) -> bool {
        self.is_locked_at(Instant::now())
    }

    fn request_at(&mut self, now: Instant, reason: &str) -> bool {
        self.release_if_expired(now);

        if self.in_flight {
            debug!("跳转请求被拒绝（上一次跳转仍在途）: {}", reason);
            return false;
        }
        if let Some(last) = self.last_grant {
            if now.duration_since(last) < self.cooldown {
                debug!("跳转请求被拒绝（冷却期内）: {}", reason);
                return false;
            }
        }

        self.in_flight = true;
        self.last_grant = Some(now);
        info!("⏭️ 跳转下一项: {}", reason);
        true
    }

    fn is_locked_at(&self, now: Instant) -> bool {
        if !self.in_flight {
            return false;
        }
        match self.last_grant {
            Some(last) => now.duration_since(last) < self.cooldown,
            None => false,
        }
    }

    fn release_if_expired(&mut self, now: Instant) {
        if self.in_flight {
            if let Some(last) = self.last_grant {
                if now.duration_since(last) >= self.cooldown {
                    self.in_flight = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_requests_within_cooldown_grant_once() {
        let mut gate = AdvanceGate::new(Duration::from_secs(10));
        let t0 = Instant::now();

        assert!(gate.request_at(t0, "第一次"));
        // 冷却期内的第二次请求必须被拒绝
        assert!(!gate.request_at(t0 + Duration::from_secs(3), "第二次"));
    }

    #[test]
    fn test_requests_beyond_cooldown_both_grant() {
        let mut gate = AdvanceGate::new(Duration::from_secs(10));
        let t0 = Instant::now();

        assert!(gate.request_at(t0, "第一次"));
        assert!(gate.request_at(t0 + Duration::from_secs(11), "第二次"));
    }

    #[test]
    fn test_lock_held_during_cooldown() {
        let mut gate = AdvanceGate::new(Duration::from_secs(10));
        let t0 = Instant::now();

        assert!(!gate.is_locked_at(t0));
        gate.request_at(t0, "跳转");
        assert!(gate.is_locked_at(t0 + Duration::from_secs(5)));
        assert!(!gate.is_locked_at(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_burst_of_requests_grants_exactly_one() {
        let mut gate = AdvanceGate::new(Duration::from_secs(10));
        let t0 = Instant::now();

        let granted = (0..5)
            .filter(|i| gate.request_at(t0 + Duration::from_secs(*i), "并发信号"))
            .count();
        assert_eq!(granted, 1);
    }
}
