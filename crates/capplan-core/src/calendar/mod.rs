//! Working-day calendar.

mod working_days;

pub use working_days::{
    add_working_days, count_working_days, is_working_day, week_start, DAYS_PER_FTE,
};
