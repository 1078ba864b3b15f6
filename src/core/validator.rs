//! 請求驗證：存在性 → 日期時間 → 時差，遇到第一個錯誤就返回。

use crate::core::normalizer;
use crate::domain::model::{BirthRequest, ParsedLocalMoment, UtcOffsetValue};
use crate::utils::error::{HdError, Result};
use chrono::{DateTime, Datelike, NaiveDateTime, TimeDelta};

const LOCAL_MOMENT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 時差借用一個固定時刻交給 chrono 的 `%:z` 解析
const OFFSET_ANCHOR: &str = "2000-01-01T00:00:00";
const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// 只接受四位數年份，後續減去時差不會溢位
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// 三個欄位都必須存在且去除空白後非空
///
/// 錯誤訊息刻意不指出是哪個欄位。
pub fn validate_presence(request: &BirthRequest) -> Result<()> {
    let fields = [&request.birth_date, &request.birth_time, &request.utc_offset];
    if fields
        .iter()
        .all(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
    {
        Ok(())
    } else {
        Err(HdError::MissingFieldError)
    }
}

/// 組成 `<date>T<time>:00` 後解析，秒數固定補 `00`
pub fn parse_local_moment(birth_date: &str, birth_time: &str) -> Result<ParsedLocalMoment> {
    let birth_date = birth_date.trim();
    let birth_time = birth_time.trim();

    // chrono 的數字欄位會吃掉內部空白與正負號，先擋掉
    if !only_digits_and(birth_date, '-') || !only_digits_and(birth_time, ':') {
        tracing::debug!(
            "Rejected local moment '{} {}': unexpected characters",
            birth_date,
            birth_time
        );
        return Err(HdError::InvalidDateTimeError);
    }

    let combined = format!("{}T{}:00", birth_date, birth_time);
    let local = NaiveDateTime::parse_from_str(&combined, LOCAL_MOMENT_FORMAT).map_err(|e| {
        tracing::debug!("Rejected local moment '{}': {}", combined, e);
        HdError::InvalidDateTimeError
    })?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&local.year()) {
        tracing::debug!("Rejected local moment '{}': year out of range", combined);
        return Err(HdError::InvalidDateTimeError);
    }

    Ok(ParsedLocalMoment::new(local))
}

fn only_digits_and(text: &str, separator: char) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c == separator)
}

/// 解析 `[+|-]H[H]:MM` 形式的時差
///
/// 沒有正負號視為正，一位數小時補零後交給 chrono；範圍只受 chrono
/// `FixedOffset` 限制（未滿 24 小時）。
pub fn parse_offset(utc_offset: &str) -> Result<UtcOffsetValue> {
    let text = utc_offset.trim();
    let (sign, body) = match text.chars().next() {
        Some(sign @ ('+' | '-')) => (sign, &text[1..]),
        _ => ('+', text),
    };

    // chrono 也接受省略冒號或以空白分隔，這裡只留 H[H]:MM
    if !only_digits_and(body, ':') || body.matches(':').count() != 1 {
        return Err(HdError::InvalidOffsetError);
    }
    let body = match body.find(':') {
        Some(1) => format!("0{}", body),
        _ => body.to_string(),
    };

    let parsed = DateTime::parse_from_str(
        &format!("{}{}{}", OFFSET_ANCHOR, sign, body),
        OFFSET_FORMAT,
    )
    .map_err(|e| {
        tracing::debug!("Rejected UTC offset '{}': {}", text, e);
        HdError::InvalidOffsetError
    })?;

    let seconds = parsed.offset().local_minus_utc();
    Ok(UtcOffsetValue::new(TimeDelta::seconds(i64::from(seconds))))
}

/// 依序執行三個檢查
pub fn validate(request: &BirthRequest) -> Result<(ParsedLocalMoment, UtcOffsetValue)> {
    validate_presence(request)?;

    // validate_presence 已確認三者皆存在
    let birth_date = request.birth_date.as_deref().unwrap_or_default();
    let birth_time = request.birth_time.as_deref().unwrap_or_default();
    let utc_offset = request.utc_offset.as_deref().unwrap_or_default();

    let moment = parse_local_moment(birth_date, birth_time)?;
    let offset = parse_offset(utc_offset)?;

    // 換算後仍須落在四位數年份內，RFC 3339 才表示得出來
    let utc_year = normalizer::to_utc(&moment, &offset).as_datetime().year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&utc_year) {
        tracing::debug!(
            "Rejected {} with offset {}: UTC year {} out of range",
            moment.naive(),
            offset,
            utc_year
        );
        return Err(HdError::InvalidDateTimeError);
    }
    Ok((moment, offset))
}
