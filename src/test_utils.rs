use chrono::NaiveDate;

use crate::{DateValue, Selection};

pub fn date(year: i32, month: u32, day: u32) -> DateValue {
    let value = DateValue::from_ymd(year, month, day);
    assert!(value.is_valid(), "test date {year}-{month}-{day} does not exist");
    value
}

pub fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateValue {
    let value = DateValue::from_ymd_hms(year, month, day, hour, minute, second);
    assert!(value.is_valid(), "test date-time does not exist");
    value
}

pub fn naive_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("test date does not exist")
}

pub fn selection(dates: &[DateValue]) -> Selection {
    Selection::from(dates.to_vec())
}
