use crate::api::Report;

pub(super) fn entered(reports: &mut Vec<Report>) {
    reports.push(Report::MapEntered);
}
