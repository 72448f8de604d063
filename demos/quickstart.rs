use chrono::Utc;
use revjul::{CalendarDate, JulianDayNumber};

fn main() {
    let now = CalendarDate::from_utc(Utc::now()).expect("current date");
    let jdn = now.to_julian_day_number().expect("encodable date");

    println!("Revised Julian: {now}");
    println!("{jdn}");
    println!("JD: {}", jdn.to_days());
    println!("MJD: {}", jdn.modified());
    println!("Weekday: {}", jdn.weekday());

    let back = JulianDayNumber::j2000().to_calendar_date().expect("J2000");
    println!("J2000.0: {back}");
}
