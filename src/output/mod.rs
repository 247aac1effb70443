pub mod formatter;

pub use formatter::{
    display_width, format_age, format_field_errors, format_member_detail, format_pager,
    format_pledges, format_post_detail, format_post_list, format_question, format_regions,
    format_result, format_result_json, format_roster, format_score_bar, format_table,
    format_timestamp, should_use_colors, truncate_to_width,
};
