use super::*;

#[test]
fn can_detect_time_quota_state() {
    assert!(!TimeQuota::new(3600.).is_reached());
    assert!(TimeQuota::new(-1.).is_reached());
}
