mod format;
mod history;
mod result;

pub(crate) use history::render_history;
pub(crate) use result::render_result;
