/// 当前 UTC 时间戳（秒）
///
/// JWT `exp` claims are compared in whole seconds.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
