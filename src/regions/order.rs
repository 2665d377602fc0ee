use super::rect::Rect;

/// Indices of `rects` in reading order: top-to-bottom rows, left-to-right
/// inside each row.
///
/// Rectangles are visited by ascending center-y (stable). A row opens at the
/// first unvisited rectangle and keeps that center-y as its anchor; later
/// rectangles join while `|cy - anchor| <= row_tol_ratio * row_height`, where
/// the row height grows to the tallest member seen so far.
pub fn sort_reading_order(rects: &[Rect], row_tol_ratio: f64) -> Vec<usize> {
    let mut by_y: Vec<usize> = (0..rects.len()).collect();
    by_y.sort_by(|&a, &b| rects[a].center().y.total_cmp(&rects[b].center().y));

    let mut out = Vec::with_capacity(rects.len());
    let mut row: Vec<usize> = Vec::new();
    let mut anchor = 0.0;
    let mut row_height = 0.0;
    for idx in by_y {
        let r = &rects[idx];
        let cy = r.center().y;
        let h = f64::from(r.height);
        if !row.is_empty() && (cy - anchor).abs() <= row_tol_ratio * row_height {
            row.push(idx);
            row_height = f64::max(row_height, h);
            continue;
        }
        flush_row(&mut row, rects, &mut out);
        row.push(idx);
        anchor = cy;
        row_height = h;
    }
    flush_row(&mut row, rects, &mut out);
    out
}

fn flush_row(row: &mut Vec<usize>, rects: &[Rect], out: &mut Vec<usize>) {
    row.sort_by(|&a, &b| rects[a].center().x.total_cmp(&rects[b].center().x));
    out.append(row);
}
