//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/bills/{id}', use [format_endpoint].

use std::fmt::Display;

/// The root route which redirects to the default group's bills page.
pub const ROOT: &str = "/";
/// The page for displaying a group's bills and their summary.
pub const BILLS_VIEW: &str = "/bills/{group_id}";
/// The page for editing one of a group's bills, use [format_bill_endpoint].
pub const EDIT_BILL_VIEW: &str = "/bills/{group_id}/{bill_id}/edit";
/// The route the delete buttons on the bills page post to, use [format_bill_endpoint].
pub const DELETE_BILL_VIEW: &str = "/bills/{group_id}/{bill_id}/delete";

/// The route to create a bill.
pub const BILLS: &str = "/api/bills";
/// The route to access bills by ID.
///
/// `GET` treats `{id}` as a group ID and lists that group's bills, while `PUT`
/// and `DELETE` treat it as the ID of a single bill. The parameter has to share
/// one name because the router does not allow differently named parameters in
/// the same position.
pub const BILL: &str = "/api/bills/{id}";
/// The route to summarise a group's bills, `{id}` is the group ID.
pub const BILL_SUMMARY: &str = "/api/bills/{id}/summary";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/bills/{id}', '{id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// Replace the group and bill parameters, in that order, in `endpoint_path`.
pub fn format_bill_endpoint(endpoint_path: &str, group_id: &str, bill_id: impl Display) -> String {
    format_endpoint(&format_endpoint(endpoint_path, group_id), bill_id)
}
