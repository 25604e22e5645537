use std::collections::HashMap;

use time::{Date, Weekday};

use crate::snapshot::Contributions;

/// Rolling display window: the 30 calendar days ending today, inclusive.
/// Anything older in the snapshot is ignored.
const WINDOW_DAYS: i64 = 30;

const CELL_SIZE: i32 = 18;
const CELL_MARGIN: i32 = 4;
const GRID_LEFT: i32 = 50;
const GRID_TOP: i32 = 45;

const WEEKDAY_LABELS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// Five fixed count-range tiers, none to brightest. Boundary values belong
/// to the lower tier.
fn tier_color(count: u32) -> &'static str {
    match count {
        0 => "#1a1a1a",
        1..=2 => "#0d5c1a",
        3..=5 => "#1a7d2e",
        6..=10 => "#2ebf4f",
        _ => "#4aff7a",
    }
}

fn short_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// Renders the contribution calendar as standalone SVG markup. Returns an
/// empty string when there is no daily data at all. Deterministic for a
/// fixed `today`.
pub fn render_svg(contributions: &Contributions, today: Date) -> String {
    if contributions.daily.is_empty() {
        return String::new();
    }

    let counts: HashMap<Date, u32> = contributions
        .daily
        .iter()
        .map(|day| (day.date, day.count))
        .collect();

    let mut svg = String::new();
    svg.push_str(r#"<svg width="100" height="40" xmlns="http://www.w3.org/2000/svg">"#);
    svg.push_str(STYLE);

    for (row, label) in WEEKDAY_LABELS.iter().enumerate() {
        let y = GRID_TOP + row as i32 * (CELL_SIZE + CELL_MARGIN) + CELL_SIZE / 2 + 3;
        svg.push_str(&format!(
            r#"<text x="30" y="{y}" class="day-label" text-anchor="end">{label}</text>"#
        ));
    }

    let start = today - time::Duration::days(WINDOW_DAYS - 1);
    let mut date = start;
    let mut day_index: i32 = 0;
    while date <= today {
        // Days absent from the snapshot are count 0, not "unknown".
        let count = counts.get(&date).copied().unwrap_or(0);
        let week_day = i32::from(date.weekday().number_days_from_sunday());
        let week_num = day_index / 7;

        let x = GRID_LEFT + week_num * (CELL_SIZE + CELL_MARGIN);
        let y = GRID_TOP + week_day * (CELL_SIZE + CELL_MARGIN);

        let month = date.month() as u8;
        let display_date = format!("{}月{}日", month, date.day());
        let display_day = short_weekday(date.weekday());
        let weekday_label = WEEKDAY_LABELS[week_day as usize];

        svg.push_str(&format!(
            r#"<rect class="contrib-cell" x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" fill="{color}" data-count="{count}" data-date="{date_attr}" data-display-date="{display_date}" data-display-day="{display_day}"><title>{display_date} ({weekday_label}): {count} 次提交</title></rect>"#,
            color = tier_color(count),
            date_attr = iso_date(date),
        ));

        if date.day() == 1 || day_index == 0 {
            svg.push_str(&format!(
                r#"<text x="{label_x}" y="30" class="month-label" text-anchor="middle">{month}月</text>"#,
                label_x = x + CELL_SIZE / 2,
            ));
        }

        date = match date.next_day() {
            Some(next) => next,
            None => break,
        };
        day_index += 1;
    }

    svg.push_str(TOOLTIP_MARKUP);
    svg.push_str(TOOLTIP_SCRIPT);
    svg.push_str("</svg>");
    svg
}

fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

const STYLE: &str = r#"<style>
    .contrib-cell {
        rx: 4;
        ry: 4;
        transition: stroke 0.2s ease;
        cursor: pointer;
    }
    .contrib-cell:hover {
        stroke: #64ffda;
        stroke-width: 2px;
    }
    .tooltip {
        font-family: "LXGW WenKai Screen", Arial, sans-serif;
        font-size: 12px;
        fill: white;
    }
    .month-label {
        font-family: "LXGW WenKai Screen", Arial, sans-serif;
        font-size: 11px;
        fill: #aaa;
        font-weight: 500;
    }
    .day-label {
        font-family: "LXGW WenKai Screen", Arial, sans-serif;
        font-size: 10px;
        fill: #999;
    }
</style>"#;

/// Floating tooltip box, hidden until a cell is hovered.
const TOOLTIP_MARKUP: &str = r##"<rect id="tooltip-bg" x="0" y="0" width="200" height="70" fill="rgba(10, 10, 10, 0.95)" rx="8" ry="8" stroke="#64ffda" stroke-width="2" visibility="hidden" filter="url(#shadow)"/>
<text id="tooltip-date" x="15" y="30" class="tooltip" visibility="hidden" font-size="14">日期: </text>
<text id="tooltip-count" x="15" y="55" class="tooltip" visibility="hidden" font-size="14">提交次数: </text>
<defs>
    <filter id="shadow" x="-20%" y="-20%" width="140%" height="140%">
        <feDropShadow dx="2" dy="2" stdDeviation="3" flood-color="#000" flood-opacity="0.5"/>
    </filter>
</defs>"##;

/// Hover handling for the consuming frontend, clamped to the image bounds.
const TOOLTIP_SCRIPT: &str = r#"<script type="application/ecmascript"><![CDATA[
    const svg = document.querySelector("svg");
    const tooltipBg = document.getElementById("tooltip-bg");
    const tooltipDate = document.getElementById("tooltip-date");
    const tooltipCount = document.getElementById("tooltip-count");

    const cells = document.querySelectorAll(".contrib-cell");

    cells.forEach(cell => {
        cell.addEventListener("mouseenter", function(e) {
            const rect = this.getBoundingClientRect();
            const svgRect = svg.getBoundingClientRect();

            const date = this.getAttribute("data-display-date") || this.getAttribute("data-date");
            const count = this.getAttribute("data-count");
            const day = this.getAttribute("data-display-day") || "";

            tooltipDate.textContent = "日期: " + date + " (" + day + ")";
            tooltipCount.textContent = "提交次数: " + count;

            let x = rect.left - svgRect.left + rect.width / 2;
            let y = rect.top - svgRect.top - 70;

            if (y < 10) y = rect.bottom - svgRect.top + 10;
            if (x > svgRect.width - 190) x = svgRect.width - 190;
            if (x < 10) x = 10;

            tooltipBg.setAttribute("x", x);
            tooltipBg.setAttribute("y", y);
            tooltipDate.setAttribute("x", x + 10);
            tooltipDate.setAttribute("y", y + 25);
            tooltipCount.setAttribute("x", x + 10);
            tooltipCount.setAttribute("y", y + 45);

            tooltipBg.setAttribute("visibility", "visible");
            tooltipDate.setAttribute("visibility", "visible");
            tooltipCount.setAttribute("visibility", "visible");
        });

        cell.addEventListener("mouseleave", function() {
            tooltipBg.setAttribute("visibility", "hidden");
            tooltipDate.setAttribute("visibility", "hidden");
            tooltipCount.setAttribute("visibility", "hidden");
        });
    });
]]></script>"#;
