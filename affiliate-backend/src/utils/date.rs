// affiliate-backend/src/utils/date.rs

//! 外部向けAPIで使う `DD.MM.YYYY` 形式の日付の取り扱い

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// `DD.MM.YYYY` をその日の00:00:00 UTCとしてパースする
///
/// 形式不正はNoneを返す。呼び出し側がエラー応答にするか
/// 黙って無視するかを決める
pub fn parse_ddmmyyyy(value: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, "%d.%m.%Y").ok()?;
    let midnight = date.and_time(NaiveTime::MIN);
    Some(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

/// `DD.MM.YYYY` の終了日フィルタ用に翌日0時（排他上限）を返す
///
/// `created_at < 翌日0時` でその日全体を含む比較になる
pub fn parse_ddmmyyyy_exclusive_end(value: &str) -> Option<DateTime<Utc>> {
    parse_ddmmyyyy(value).map(|start_of_day| start_of_day + Duration::days(1))
}
