pub(crate) mod time;
pub(crate) mod timezone;

pub(crate) use time::parse_time_of_day;
pub(crate) use timezone::Timezone;
