use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 原始請求，三個欄位都還沒驗證過
///
/// 欄位缺少或為 `null` 時視同空白。除了 camelCase 也接受 PascalCase 欄位名。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthRequest {
    #[serde(default, alias = "BirthDate")]
    pub birth_date: Option<String>,
    #[serde(default, alias = "BirthTime")]
    pub birth_time: Option<String>,
    #[serde(default, alias = "UtcOffset")]
    pub utc_offset: Option<String>,
}

impl BirthRequest {
    pub fn new(
        birth_date: impl Into<String>,
        birth_time: impl Into<String>,
        utc_offset: impl Into<String>,
    ) -> Self {
        Self {
            birth_date: Some(birth_date.into()),
            birth_time: Some(birth_time.into()),
            utc_offset: Some(utc_offset.into()),
        }
    }
}

/// 不帶時區的當地日期時間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLocalMoment(NaiveDateTime);

impl ParsedLocalMoment {
    pub fn new(local: NaiveDateTime) -> Self {
        Self(local)
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

/// 與 UTC 的有號時差
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffsetValue(TimeDelta);

impl UtcOffsetValue {
    pub fn new(offset: TimeDelta) -> Self {
        Self(offset)
    }

    pub fn duration(&self) -> TimeDelta {
        self.0
    }
}

impl fmt::Display for UtcOffsetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.num_seconds();
        let sign = if total < 0 { '-' } else { '+' };
        let abs = total.unsigned_abs();
        let (hours, minutes, seconds) = (abs / 3600, (abs % 3600) / 60, abs % 60);

        if seconds == 0 {
            write!(f, "{}{:02}:{:02}", sign, hours, minutes)
        } else {
            write!(f, "{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
        }
    }
}

/// 正規化後的 UTC 時刻，唯一交給星盤計算服務的資料
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalInstant(DateTime<Utc>);

impl CanonicalInstant {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// RFC 3339，秒精度，固定以 `Z` 結尾
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl fmt::Display for CanonicalInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for CanonicalInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

/// 星盤計算服務回傳的分類標籤，內容不做任何假設
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classification(String);

impl Classification {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 成功回應 `{ "type": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HdTypeResponse {
    #[serde(rename = "type")]
    pub hd_type: Classification,
}
