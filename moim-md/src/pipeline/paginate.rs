//! Pagination slicer

use crate::models::MeetingRecord;

/// One visible page plus paging metadata
#[derive(Debug, Clone)]
pub struct PageSlice {
    pub meetings: Vec<MeetingRecord>,
    /// The page that was requested (1-based), echoed back unchanged
    pub page: u32,
    pub total_pages: u32,
    /// Count of the full filtered sequence, before slicing
    pub total_count: usize,
}

/// Slice the ranked sequence for a 1-based `page`.
///
/// Out-of-range pages, including page 0, yield an empty slice rather than an
/// error. `total_pages` is `ceil(count / page_size)`. Page selection alone
/// never triggers a fetch; this is pure arithmetic over the cached sequence.
pub fn slice(records: &[MeetingRecord], page: u32, page_size: usize) -> PageSlice {
    let page_size = page_size.max(1);
    let total_count = records.len();
    let total_pages = ((total_count + page_size - 1) / page_size) as u32;

    let meetings = if page == 0 {
        Vec::new()
    } else {
        let start = (page as usize - 1).saturating_mul(page_size);
        records.iter().skip(start).take(page_size).cloned().collect()
    };

    PageSlice {
        meetings,
        page,
        total_pages,
        total_count,
    }
}
