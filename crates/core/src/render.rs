//! Plain-text page layout for a projected prescription.
//!
//! The page is a fixed box of `width` columns by `height` lines. Content is laid
//! out top-down (title, header, patient block, RP section) and the signature and
//! fee footer is pushed to the bottom of the box. A prescription too long for
//! the box is not truncated; the footer then follows directly.
//!
//! Column widths are measured in display columns: CJK ideographs and full-width
//! punctuation occupy two columns, everything else one.

use crate::projector::{MedicineColumns, PrintDocument, PrintGroup, PrintLine};
use unicode_width::UnicodeWidthStr;

/// Default page width in columns.
pub const PAGE_WIDTH: usize = 72;

/// Default page height in lines.
pub const PAGE_HEIGHT: usize = 66;

const CHECKED_BOX: &str = "[x]";
const UNCHECKED_BOX: &str = "[ ]";

/// Service laying out a [`PrintDocument`] on a fixed-size text page.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    width: usize,
    height: usize,
}

impl PageRenderer {
    /// Creates a renderer for the default page box.
    pub fn new() -> Self {
        Self::with_size(PAGE_WIDTH, PAGE_HEIGHT)
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Renders one page.
    ///
    /// # Arguments
    ///
    /// * `document` - Projected prescription.
    /// * `title` - Heading printed centred on the first line.
    ///
    /// # Returns
    ///
    /// The page text, one `\n`-terminated line per printed line, without
    /// trailing spaces.
    pub fn page_render(&self, document: &PrintDocument, title: &str) -> String {
        let mut body = self.header_render(document, title);
        body.push("RP".to_string());
        for group in &document.groups {
            body.extend(self.group_render(group));
        }

        let footer = self.footer_render();
        let filler = self
            .height
            .saturating_sub(body.len())
            .saturating_sub(footer.len());

        let mut output = String::new();
        for line in body
            .iter()
            .chain(std::iter::repeat(&String::new()).take(filler))
            .chain(footer.iter())
        {
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output
    }

    fn header_render(&self, document: &PrintDocument, title: &str) -> Vec<String> {
        let third = self.width / 3;
        let half = self.width / 2;

        let boxes = document
            .charge_boxes
            .iter()
            .map(|b| {
                let mark = if b.checked { CHECKED_BOX } else { UNCHECKED_BOX };
                format!("{} {}", mark, b.label)
            })
            .collect::<Vec<_>>()
            .join("  ");

        vec![
            self.centre(title),
            String::new(),
            self.spread(
                &format!("病历号（门诊口/住院口）：{}", document.case_number),
                &format!("开具日期：{}", document.issue_date),
            ),
            self.rule('-'),
            row(&[
                (format!("姓名：{}", document.patient_name).as_str(), third),
                (format!("性别：{}", document.patient_gender).as_str(), third),
                (format!("年龄：{}", document.patient_age).as_str(), 0),
            ]),
            row(&[
                (format!("住址/电话：{}", document.patient_address).as_str(), half),
                (format!("科别：{}", document.department_name).as_str(), 0),
            ]),
            format!("费别：{}", boxes),
            format!("临床诊断：{}", document.diagnosis),
            self.rule('-'),
        ]
    }

    fn group_render(&self, group: &PrintGroup) -> Vec<String> {
        let mut lines: Vec<String> = group.lines.iter().map(|l| self.line_render(l)).collect();
        let column = self.width / 6;
        lines.push(row(&[
            ("Sig:", column * 2),
            (group.sig.way.as_str(), column * 2),
            (group.sig.rate.as_str(), column),
            (group.sig.frequency.as_str(), column / 2 + 2),
            (group.sig.days.as_str(), 0),
        ]));
        lines.push(self.rule('-'));
        lines
    }

    fn line_render(&self, line: &PrintLine) -> String {
        let twelfth = self.width / 12;
        match &line.medicine {
            MedicineColumns::TwoColumn {
                name,
                specification,
            } => row(&[
                ("  ", 2),
                (name.as_str(), twelfth * 4),
                (specification.as_str(), twelfth * 3),
                (line.container.as_str(), twelfth + 2),
                (line.per_dose.as_str(), 0),
            ]),
            MedicineColumns::ThreeColumn {
                name,
                specification,
                marker,
            } => row(&[
                ("  ", 2),
                (name.as_str(), twelfth * 3),
                (specification.as_str(), twelfth * 2),
                (marker.as_str(), twelfth * 2),
                (line.container.as_str(), twelfth + 2),
                (line.per_dose.as_str(), 0),
            ]),
        }
    }

    fn footer_render(&self) -> Vec<String> {
        let third = self.width / 3;
        vec![
            row(&[("", self.width / 2), ("医师签名：", 0)]),
            self.rule('='),
            row(&[("审核，发药：", third), ("药费：", third), ("新农合补助：", 0)]),
            row(&[("收费员：", third), ("其他费：", third), ("审核人签字：", 0)]),
            row(&[("", third), ("合计：", 0)]),
            self.rule('='),
        ]
    }

    fn centre(&self, text: &str) -> String {
        let indent = self.width.saturating_sub(display_width(text)) / 2;
        format!("{}{}", " ".repeat(indent), text)
    }

    /// Left text at the left margin, right text flush with the right margin.
    fn spread(&self, left: &str, right: &str) -> String {
        let used = display_width(left) + display_width(right);
        let gap = self.width.saturating_sub(used).max(2);
        format!("{}{}{}", left, " ".repeat(gap), right)
    }

    fn rule(&self, c: char) -> String {
        std::iter::repeat(c).take(self.width).collect()
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lays out cells left to right, padding each to its column width. A width of
/// zero leaves the cell unpadded. Overlong cells are followed by one space.
fn row(cells: &[(&str, usize)]) -> String {
    let mut out = String::new();
    for (text, width) in cells {
        out.push_str(text);
        if *width == 0 {
            continue;
        }
        let used = display_width(text);
        let pad = if used < *width { width - used } else { 1 };
        out.push_str(&" ".repeat(pad));
    }
    out
}

/// Columns `text` occupies on a terminal or fixed-pitch printer.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_DEPARTMENT;
    use crate::editor::{PrescriptionEditor, UsageField};
    use crate::projector::project;
    use chrono::NaiveDate;
    use ivrx_types::{ChargeType, MedicineRef, SkinTest};

    fn sample() -> PrintDocument {
        let mut p = PrescriptionEditor::create_blank_on(
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            DEFAULT_DEPARTMENT,
        );
        p.case_number = "MZ-0042".into();
        p.patient_name = "张三".into();
        p.charge_type = ChargeType::Insurance;
        p.diagnoses = vec!["急性上呼吸道感染".into()];
        p.custom_diagnosis = "发热".into();
        let p = PrescriptionEditor::set_medicine_usage_field(
            &p,
            0,
            0,
            UsageField::Medicine(Some(MedicineRef::new("头孢曲松钠-1g"))),
        )
        .unwrap();
        let p = PrescriptionEditor::set_medicine_usage_field(
            &p,
            0,
            0,
            UsageField::SkinTest(Some(SkinTest::Required)),
        )
        .unwrap();
        project(&p)
    }

    #[test]
    fn test_display_width_counts_cjk_as_two() {
        assert_eq!(display_width("RP"), 2);
        assert_eq!(display_width("自费"), 4);
        assert_eq!(display_width("费别："), 6);
        assert_eq!(display_width("30滴/分"), 7);
        assert_eq!(display_width("（门诊口/住院口）"), 17);
    }

    #[test]
    fn test_page_has_fixed_height() {
        let page = PageRenderer::new().page_render(&sample(), "注射处方签");
        assert_eq!(page.lines().count(), PAGE_HEIGHT);
        assert!(page.lines().all(|l| l == l.trim_end()));
    }

    #[test]
    fn test_page_has_exactly_one_checked_box() {
        let page = PageRenderer::new().page_render(&sample(), "注射处方签");
        assert_eq!(page.matches(CHECKED_BOX).count(), 1);
        assert_eq!(page.matches(UNCHECKED_BOX).count(), 4);
        assert!(page.contains("[x] 医保"));
    }

    #[test]
    fn test_page_contents() {
        let page = PageRenderer::new().page_render(&sample(), "注射处方签");
        let first = page.lines().next().unwrap();
        assert_eq!(first.trim(), "注射处方签");
        assert!(first.starts_with(' '));

        assert!(page.contains("病历号（门诊口/住院口）：MZ-0042"));
        assert!(page.contains("开具日期：2026-10-16"));
        assert!(page.contains("姓名：张三"));
        assert!(page.contains("临床诊断：急性上呼吸道感染，发热"));
        assert!(page.contains("头孢曲松钠"));
        assert!(page.contains("皮试"));
        assert!(page.contains("Sig:"));
        assert!(page.contains("30滴/分"));
        assert!(page.contains("医师签名："));
        assert!(page.contains("新农合补助："));
        assert!(page.trim_end().ends_with(&"=".repeat(PAGE_WIDTH)));
    }

    #[test]
    fn test_long_document_is_not_truncated() {
        let mut doc = sample();
        let group = doc.groups[0].clone();
        doc.groups = vec![group; 20];
        let page = PageRenderer::new().page_render(&doc, "注射处方签");
        assert!(page.lines().count() > PAGE_HEIGHT);
        assert_eq!(page.matches("Sig:").count(), 20);
    }

    #[test]
    fn test_row_pads_by_display_width() {
        let line = row(&[("姓名：", 10), ("x", 0)]);
        assert_eq!(line, "姓名：    x");
    }
}
