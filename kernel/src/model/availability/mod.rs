use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::Serialize;

use crate::model::{
    booking::BookingWindow,
    id::{AvailabilityId, FacilityId, UnavailabilityId, UserId},
};

pub mod event;

// 施設の定常的な営業時間。曜日（0 = 日曜）ごとに 1 行
#[derive(Debug, Clone)]
pub struct AvailabilityRule {
    pub availability_id: AvailabilityId,
    pub facility_id: FacilityId,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub advance_booking_days: i32,
    pub minimum_booking_duration: i32,
    pub maximum_booking_duration: i32,
    pub buffer_time_before: i32,
    pub buffer_time_after: i32,
}

impl AvailabilityRule {
    fn start_secs(&self) -> u32 {
        self.start_time.num_seconds_from_midnight()
    }

    fn end_secs(&self) -> u32 {
        self.end_time.num_seconds_from_midnight()
    }
}

// 営業時間より優先されるブラックアウト（メンテナンス・休業など）
#[derive(Debug, Clone)]
pub struct UnavailabilityWindow {
    pub unavailability_id: UnavailabilityId,
    pub facility_id: FacilityId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub created_by: UserId,
}

impl UnavailabilityWindow {
    pub fn blocks(&self, window: &BookingWindow) -> bool {
        if self.is_recurring {
            // 毎週、同じ曜日の同じ時間帯に繰り返す。日をまたがない前提
            let weekday = self.start_time.weekday();
            let start_secs = self.start_time.time().num_seconds_from_midnight();
            let end_secs = self.end_time.time().num_seconds_from_midnight();
            split_into_day_segments(window).iter().any(|seg| {
                seg.date.weekday() == weekday
                    && start_secs < seg.end_secs
                    && seg.start_secs < end_secs
            })
        } else {
            self.start_time < window.end && window.start < self.end_time
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AvailabilityRejection {
    OutsideHours,
    TooShort,
    TooLong,
    Blackout,
    TooFarOut,
}

// 候補時間帯を UTC の日付単位に分割したもの。秒は真夜中からの経過秒で、
// 翌日 0 時ちょうどで終わるセグメントの end_secs は 86400 になる
#[derive(Debug)]
struct DaySegment {
    date: NaiveDate,
    start_secs: u32,
    end_secs: u32,
}

fn split_into_day_segments(window: &BookingWindow) -> Vec<DaySegment> {
    let mut segments = Vec::new();
    let mut cursor = window.start;
    while cursor < window.end {
        let date = cursor.date_naive();
        let next_midnight = (date + Days::new(1)).and_time(NaiveTime::MIN).and_utc();
        let seg_end = window.end.min(next_midnight);
        let end_secs = if seg_end == next_midnight {
            86_400
        } else {
            seg_end.time().num_seconds_from_midnight()
        };
        segments.push(DaySegment {
            date,
            start_secs: cursor.time().num_seconds_from_midnight(),
            end_secs,
        });
        cursor = seg_end;
    }
    segments
}

// 施設 1 件分の営業時間ルールとブラックアウトをまとめ、
// 候補時間帯が予約可能かどうかを判定する
#[derive(Debug, Clone)]
pub struct AvailabilitySchedule {
    rules: Vec<AvailabilityRule>,
    blackouts: Vec<UnavailabilityWindow>,
}

impl AvailabilitySchedule {
    pub fn new(rules: Vec<AvailabilityRule>, blackouts: Vec<UnavailabilityWindow>) -> Self {
        Self { rules, blackouts }
    }

    pub fn resolve(
        &self,
        window: &BookingWindow,
        now: DateTime<Utc>,
    ) -> Result<(), AvailabilityRejection> {
        let duration = window.duration_minutes();
        let segments = split_into_day_segments(window);

        // 日をまたぐ場合は両日のルールで判定する。
        // 各セグメントは単一のルールの枠内に完全に収まらなければならない
        let mut first_rule: Option<&AvailabilityRule> = None;
        let mut last_rule: Option<&AvailabilityRule> = None;
        for segment in &segments {
            let rule = self
                .covering_rule(segment)
                .ok_or(AvailabilityRejection::OutsideHours)?;
            if duration < rule.minimum_booking_duration as i64 {
                return Err(AvailabilityRejection::TooShort);
            }
            if duration > rule.maximum_booking_duration as i64 {
                return Err(AvailabilityRejection::TooLong);
            }
            let days_ahead = (segment.date - now.date_naive()).num_days();
            if days_ahead > rule.advance_booking_days as i64 {
                return Err(AvailabilityRejection::TooFarOut);
            }
            if first_rule.is_none() {
                first_rule = Some(rule);
            }
            last_rule = Some(rule);
        }

        // バッファで広げた範囲がブラックアウトに触れたら拒否する
        let before = first_rule.map(|r| r.buffer_time_before as i64).unwrap_or(0);
        let after = last_rule.map(|r| r.buffer_time_after as i64).unwrap_or(0);
        let buffered = BookingWindow::new(
            window.start - Duration::minutes(before),
            window.end + Duration::minutes(after),
        );
        if self.blackouts.iter().any(|b| b.blocks(&buffered)) {
            return Err(AvailabilityRejection::Blackout);
        }

        Ok(())
    }

    fn covering_rule(&self, segment: &DaySegment) -> Option<&AvailabilityRule> {
        let weekday = segment.date.weekday().num_days_from_sunday() as i16;
        self.rules.iter().find(|rule| {
            rule.is_available
                && rule.day_of_week == weekday
                && rule.start_secs() <= segment.start_secs
                && segment.end_secs <= rule.end_secs()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2025-07-07 は月曜日
    fn monday() -> NaiveDate {
        let date = NaiveDate::from_ymd_opt(2025, 7, 7).unwrap();
        assert_eq!(date.weekday(), chrono::Weekday::Mon);
        date
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> DateTime<Utc> {
        date.and_hms_opt(h, m, 0).unwrap().and_utc()
    }

    fn rule_for(date: NaiveDate, start: (u32, u32), end: (u32, u32)) -> AvailabilityRule {
        AvailabilityRule {
            availability_id: AvailabilityId::new(),
            facility_id: FacilityId::new(),
            day_of_week: date.weekday().num_days_from_sunday() as i16,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            is_available: true,
            advance_booking_days: 30,
            minimum_booking_duration: 60,
            maximum_booking_duration: 480,
            buffer_time_before: 0,
            buffer_time_after: 0,
        }
    }

    fn blackout(start: DateTime<Utc>, end: DateTime<Utc>, recurring: bool) -> UnavailabilityWindow {
        UnavailabilityWindow {
            unavailability_id: UnavailabilityId::new(),
            facility_id: FacilityId::new(),
            start_time: start,
            end_time: end,
            reason: Some("maintenance".into()),
            description: None,
            is_recurring: recurring,
            created_by: UserId::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_accepts_window_inside_open_hours() {
        // 月曜 09:00-17:00、最短 60 分、最長 480 分
        let schedule = AvailabilitySchedule::new(vec![rule_for(monday(), (9, 0), (17, 0))], vec![]);
        let window = BookingWindow::new(at(monday(), 10, 0), at(monday(), 11, 0));
        assert_eq!(schedule.resolve(&window, now()), Ok(()));
    }

    #[test]
    fn test_rejects_window_outside_open_hours() {
        let schedule = AvailabilitySchedule::new(vec![rule_for(monday(), (9, 0), (17, 0))], vec![]);
        // 08:00-09:30 は開場前にはみ出している
        let window = BookingWindow::new(at(monday(), 8, 0), at(monday(), 9, 30));
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::OutsideHours)
        );
    }

    #[test]
    fn test_rejects_day_without_rule() {
        let schedule = AvailabilitySchedule::new(vec![rule_for(monday(), (9, 0), (17, 0))], vec![]);
        let tuesday = monday() + Days::new(1);
        let window = BookingWindow::new(at(tuesday, 10, 0), at(tuesday, 11, 0));
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::OutsideHours)
        );
    }

    #[test]
    fn test_rejects_too_short_and_too_long() {
        let mut rule = rule_for(monday(), (9, 0), (17, 0));
        rule.minimum_booking_duration = 60;
        rule.maximum_booking_duration = 120;
        let schedule = AvailabilitySchedule::new(vec![rule], vec![]);

        let short = BookingWindow::new(at(monday(), 10, 0), at(monday(), 10, 30));
        assert_eq!(
            schedule.resolve(&short, now()),
            Err(AvailabilityRejection::TooShort)
        );

        let long = BookingWindow::new(at(monday(), 10, 0), at(monday(), 13, 0));
        assert_eq!(
            schedule.resolve(&long, now()),
            Err(AvailabilityRejection::TooLong)
        );
    }

    #[test]
    fn test_blackout_overrides_open_hours() {
        // 月曜 10:00-12:00 がメンテナンスの場合、営業時間内でも拒否される
        let schedule = AvailabilitySchedule::new(
            vec![rule_for(monday(), (9, 0), (17, 0))],
            vec![blackout(at(monday(), 10, 0), at(monday(), 12, 0), false)],
        );
        let window = BookingWindow::new(at(monday(), 10, 30), at(monday(), 11, 30));
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::Blackout)
        );

        // ブラックアウトの外側なら通る
        let window = BookingWindow::new(at(monday(), 13, 0), at(monday(), 14, 0));
        assert_eq!(schedule.resolve(&window, now()), Ok(()));
    }

    #[test]
    fn test_buffer_expands_blackout_check() {
        let mut rule = rule_for(monday(), (9, 0), (17, 0));
        rule.buffer_time_before = 30;
        let schedule = AvailabilitySchedule::new(
            vec![rule],
            vec![blackout(at(monday(), 9, 0), at(monday(), 10, 0), false)],
        );
        // 本体は 10:15 開始だが、前バッファ 30 分で 09:45 からの占有になる
        let window = BookingWindow::new(at(monday(), 10, 15), at(monday(), 11, 15));
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::Blackout)
        );
    }

    #[test]
    fn test_recurring_blackout_applies_every_week() {
        let schedule = AvailabilitySchedule::new(
            vec![rule_for(monday(), (9, 0), (17, 0))],
            vec![blackout(at(monday(), 10, 0), at(monday(), 12, 0), true)],
        );
        // 翌週の月曜日でも同じ時間帯は塞がる
        let next_monday = monday() + Days::new(7);
        let window = BookingWindow::new(at(next_monday, 10, 30), at(next_monday, 11, 30));
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::Blackout)
        );

        let window = BookingWindow::new(at(next_monday, 13, 0), at(next_monday, 14, 0));
        assert_eq!(schedule.resolve(&window, now()), Ok(()));
    }

    #[test]
    fn test_rejects_beyond_advance_booking_horizon() {
        let mut rule = rule_for(monday(), (9, 0), (17, 0));
        rule.advance_booking_days = 5;
        let schedule = AvailabilitySchedule::new(vec![rule], vec![]);
        // now() は 7/1。7/7 は 6 日先なので上限 5 日を超える
        let window = BookingWindow::new(at(monday(), 10, 0), at(monday(), 11, 0));
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::TooFarOut)
        );
    }

    #[test]
    fn test_day_boundary_checks_both_days() {
        let monday = monday();
        let tuesday = monday + Days::new(1);
        let mut mon_rule = rule_for(monday, (0, 0), (23, 59));
        let mut tue_rule = rule_for(tuesday, (0, 0), (23, 59));
        mon_rule.minimum_booking_duration = 30;
        tue_rule.minimum_booking_duration = 30;

        // 月曜しかルールがなければ、火曜にかかる分で拒否される
        let schedule = AvailabilitySchedule::new(vec![mon_rule.clone()], vec![]);
        let window = BookingWindow::new(at(monday, 23, 0), at(tuesday, 1, 0));
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::OutsideHours)
        );

        // 両日にルールがあっても、月曜のルールが 23:59 までなら
        // 真夜中ちょうどまでのセグメントはカバーされない
        let schedule = AvailabilitySchedule::new(vec![mon_rule, tue_rule], vec![]);
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::OutsideHours)
        );
    }

    #[test]
    fn test_segment_must_fit_single_window() {
        // 同じ曜日に隣接する 2 枠があっても、枠をまたぐ予約は通さない
        let morning = rule_for(monday(), (9, 0), (12, 0));
        let afternoon = rule_for(monday(), (12, 0), (17, 0));
        let schedule = AvailabilitySchedule::new(vec![morning, afternoon], vec![]);

        let window = BookingWindow::new(at(monday(), 11, 0), at(monday(), 13, 0));
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::OutsideHours)
        );

        let window = BookingWindow::new(at(monday(), 12, 0), at(monday(), 14, 0));
        assert_eq!(schedule.resolve(&window, now()), Ok(()));
    }

    #[test]
    fn test_unavailable_rule_is_ignored() {
        let mut rule = rule_for(monday(), (9, 0), (17, 0));
        rule.is_available = false;
        let schedule = AvailabilitySchedule::new(vec![rule], vec![]);
        let window = BookingWindow::new(at(monday(), 10, 0), at(monday(), 11, 0));
        assert_eq!(
            schedule.resolve(&window, now()),
            Err(AvailabilityRejection::OutsideHours)
        );
    }

    #[test]
    fn test_rejection_reason_codes() {
        assert_eq!(AvailabilityRejection::OutsideHours.to_string(), "outside_hours");
        assert_eq!(AvailabilityRejection::TooShort.to_string(), "too_short");
        assert_eq!(AvailabilityRejection::TooLong.to_string(), "too_long");
        assert_eq!(AvailabilityRejection::Blackout.to_string(), "blackout");
        assert_eq!(AvailabilityRejection::TooFarOut.to_string(), "too_far_out");
    }
}
