use chrono::{Datelike, Timelike};

const WEEKDAYS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// Formats a wall-clock time the way it is printed on labels, e.g.
/// `2025年3月17日, 星期一 下午 2:05`.
///
/// Hours are on a 12-hour clock: noon is `下午 12`, midnight is `上午 12`.
pub fn format_chinese_timestamp<T: Datelike + Timelike>(t: &T) -> String {
    let weekday = WEEKDAYS[t.weekday().num_days_from_sunday() as usize];
    let (is_pm, hour12) = t.hour12();
    let period = if is_pm { "下午" } else { "上午" };

    format!(
        "{}年{}月{}日, 星期{} {} {}:{:02}",
        t.year(),
        t.month(),
        t.day(),
        weekday,
        period,
        hour12,
        t.minute()
    )
}

/// File-name stamp with second resolution, e.g. `20250317-140509`
pub fn file_stamp<T: Datelike + Timelike>(t: &T) -> String {
    format!(
        "{:04}{:02}{:02}-{:02}{:02}{:02}",
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 9))
            .expect("valid test time")
    }

    #[test]
    fn monday_afternoon() {
        // 2025-03-17 is a Monday
        assert_eq!(
            format_chinese_timestamp(&at(2025, 3, 17, 14, 5)),
            "2025年3月17日, 星期一 下午 2:05"
        );
    }

    #[test]
    fn sunday_maps_to_ri() {
        assert_eq!(
            format_chinese_timestamp(&at(2025, 3, 16, 9, 30)),
            "2025年3月16日, 星期日 上午 9:30"
        );
    }

    #[test]
    fn noon_is_pm_twelve() {
        assert_eq!(
            format_chinese_timestamp(&at(2025, 12, 6, 12, 0)),
            "2025年12月6日, 星期六 下午 12:00"
        );
    }

    #[test]
    fn midnight_is_am_twelve() {
        assert_eq!(
            format_chinese_timestamp(&at(2025, 1, 1, 0, 7)),
            "2025年1月1日, 星期三 上午 12:07"
        );
    }

    #[test]
    fn last_minute_of_the_day() {
        assert_eq!(
            format_chinese_timestamp(&at(2025, 1, 1, 23, 59)),
            "2025年1月1日, 星期三 下午 11:59"
        );
    }

    #[test]
    fn file_stamp_has_second_resolution() {
        assert_eq!(file_stamp(&at(2025, 3, 7, 4, 5)), "20250307-040509");
    }
}
