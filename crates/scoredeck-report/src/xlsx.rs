#![deny(unsafe_code)]

//! OOXML part generation.
//!
//! Worksheets and the workbook part are written with `quick_xml` events so
//! cell text and sheet names are escaped properly; the fixed boilerplate
//! parts (content types, relationships, styles) are plain templates with the
//! palette substituted after hex validation.

use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::sheet::{Sheet, SheetCell};

pub const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const FALLBACK_FILL: &str = "FF4F81BD";
const FALLBACK_FONT: &str = "FFFFFFFF";

/// Zero-based column index to spreadsheet letters (0 → A, 26 → AA).
pub fn column_letter(mut index: u32) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Zero-based (column, row) to an `A1`-style reference.
pub fn cell_ref(column: u32, row: u32) -> String {
    format!("{}{}", column_letter(column), row + 1)
}

pub fn worksheet_xml(sheet: &Sheet, widths: &[f64]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut root = BytesStart::new("worksheet");
    root.push_attribute(("xmlns", MAIN_NS));
    writer.write_event(Event::Start(root))?;

    write_sheet_views(&mut writer, sheet)?;

    if !widths.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("cols")))?;
        for (index, width) in widths.iter().enumerate() {
            let mut col = BytesStart::new("col");
            let position = (index + 1).to_string();
            col.push_attribute(("min", position.as_str()));
            col.push_attribute(("max", position.as_str()));
            col.push_attribute(("width", format!("{width:.2}").as_str()));
            col.push_attribute(("customWidth", "1"));
            writer.write_event(Event::Empty(col))?;
        }
        writer.write_event(Event::End(BytesEnd::new("cols")))?;
    }

    writer.write_event(Event::Start(BytesStart::new("sheetData")))?;
    if !sheet.header.is_empty() {
        let header: Vec<SheetCell> = sheet
            .header
            .iter()
            .map(|title| SheetCell::Text(title.clone()))
            .collect();
        write_row(&mut writer, 0, &header, true)?;
    }
    for (index, row) in sheet.rows.iter().enumerate() {
        write_row(&mut writer, index as u32 + 1, row, false)?;
    }
    writer.write_event(Event::End(BytesEnd::new("sheetData")))?;

    if sheet.autofilter && !sheet.header.is_empty() {
        let last_column = sheet.header.len() as u32 - 1;
        let last_row = sheet.rows.len() as u32;
        let mut filter = BytesStart::new("autoFilter");
        filter.push_attribute(("ref", format!("A1:{}", cell_ref(last_column, last_row)).as_str()));
        writer.write_event(Event::Empty(filter))?;
    }

    writer.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_sheet_views(writer: &mut Writer<Vec<u8>>, sheet: &Sheet) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("sheetViews")))?;
    let mut view = BytesStart::new("sheetView");
    view.push_attribute(("workbookViewId", "0"));
    match sheet.freeze {
        Some((columns, rows)) => {
            writer.write_event(Event::Start(view))?;
            let mut pane = BytesStart::new("pane");
            if columns > 0 {
                pane.push_attribute(("xSplit", columns.to_string().as_str()));
            }
            if rows > 0 {
                pane.push_attribute(("ySplit", rows.to_string().as_str()));
            }
            pane.push_attribute(("topLeftCell", cell_ref(columns, rows).as_str()));
            pane.push_attribute(("activePane", active_pane(columns, rows)));
            pane.push_attribute(("state", "frozen"));
            writer.write_event(Event::Empty(pane))?;
            writer.write_event(Event::End(BytesEnd::new("sheetView")))?;
        }
        None => {
            writer.write_event(Event::Empty(view))?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new("sheetViews")))?;
    Ok(())
}

fn active_pane(columns: u32, rows: u32) -> &'static str {
    match (columns > 0, rows > 0) {
        (true, true) => "bottomRight",
        (true, false) => "topRight",
        _ => "bottomLeft",
    }
}

fn write_row(
    writer: &mut Writer<Vec<u8>>,
    row_index: u32,
    cells: &[SheetCell],
    styled: bool,
) -> Result<()> {
    let mut row = BytesStart::new("row");
    row.push_attribute(("r", (row_index + 1).to_string().as_str()));
    writer.write_event(Event::Start(row))?;
    for (column_index, cell) in cells.iter().enumerate() {
        write_cell(writer, column_index as u32, row_index, cell, styled)?;
    }
    writer.write_event(Event::End(BytesEnd::new("row")))?;
    Ok(())
}

fn write_cell(
    writer: &mut Writer<Vec<u8>>,
    column: u32,
    row: u32,
    cell: &SheetCell,
    styled: bool,
) -> Result<()> {
    if matches!(cell, SheetCell::Empty) {
        return Ok(());
    }
    let mut c = BytesStart::new("c");
    c.push_attribute(("r", cell_ref(column, row).as_str()));
    if styled {
        c.push_attribute(("s", "1"));
    }
    match cell {
        SheetCell::Text(text) => write_inline_string(writer, c, text),
        SheetCell::Int(value) => write_value(writer, c, &value.to_string()),
        SheetCell::Number(value) if value.is_finite() => {
            write_value(writer, c, &format!("{value}"))
        }
        // NaN/inf have no numeric cell representation; degrade to text.
        SheetCell::Number(value) => write_inline_string(writer, c, &format!("{value}")),
        SheetCell::Bool(value) => {
            c.push_attribute(("t", "b"));
            write_value(writer, c, if *value { "1" } else { "0" })
        }
        SheetCell::Empty => Ok(()),
    }
}

fn write_inline_string(writer: &mut Writer<Vec<u8>>, mut c: BytesStart, text: &str) -> Result<()> {
    c.push_attribute(("t", "inlineStr"));
    writer.write_event(Event::Start(c))?;
    writer.write_event(Event::Start(BytesStart::new("is")))?;
    writer.write_event(Event::Start(BytesStart::new("t")))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("t")))?;
    writer.write_event(Event::End(BytesEnd::new("is")))?;
    writer.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

fn write_value(writer: &mut Writer<Vec<u8>>, c: BytesStart, value: &str) -> Result<()> {
    writer.write_event(Event::Start(c))?;
    writer.write_event(Event::Start(BytesStart::new("v")))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("v")))?;
    writer.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

pub fn workbook_xml(sheet_names: &[String]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut root = BytesStart::new("workbook");
    root.push_attribute(("xmlns", MAIN_NS));
    root.push_attribute(("xmlns:r", REL_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("sheets")))?;
    for (index, name) in sheet_names.iter().enumerate() {
        let mut sheet = BytesStart::new("sheet");
        sheet.push_attribute(("name", name.as_str()));
        sheet.push_attribute(("sheetId", (index + 1).to_string().as_str()));
        sheet.push_attribute(("r:id", format!("rId{}", index + 1).as_str()));
        writer.write_event(Event::Empty(sheet))?;
    }
    writer.write_event(Event::End(BytesEnd::new("sheets")))?;
    writer.write_event(Event::End(BytesEnd::new("workbook")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

pub fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut parts = String::new();
    for index in 1..=sheet_count {
        parts.push_str(&format!(
            "  <Relationship Id=\"rId{index}\" \
             Type=\"{REL_NS}/worksheet\" \
             Target=\"worksheets/sheet{index}.xml\"/>\n"
        ));
    }
    parts.push_str(&format!(
        "  <Relationship Id=\"rId{}\" Type=\"{REL_NS}/styles\" Target=\"styles.xml\"/>\n",
        sheet_count + 1
    ));
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\n\
         {parts}</Relationships>\n"
    )
}

pub const ROOT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\n  \
<Relationship Id=\"rId1\" \
Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" \
Target=\"xl/workbook.xml\"/>\n</Relationships>\n";

pub fn content_types_xml(sheet_count: usize) -> String {
    let mut overrides = String::new();
    for index in 1..=sheet_count {
        overrides.push_str(&format!(
            "  <Override PartName=\"/xl/worksheets/sheet{index}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.\
             spreadsheetml.worksheet+xml\"/>\n"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\n  \
         <Default Extension=\"rels\" \
         ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\n  \
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\n  \
         <Override PartName=\"/xl/workbook.xml\" \
         ContentType=\"application/vnd.openxmlformats-officedocument.\
         spreadsheetml.sheet.main+xml\"/>\n  \
         <Override PartName=\"/xl/styles.xml\" \
         ContentType=\"application/vnd.openxmlformats-officedocument.\
         spreadsheetml.styles+xml\"/>\n{overrides}</Types>\n"
    )
}

/// Styles part: one default format plus the header format (bold font on a
/// solid fill) the header rows reference as `s="1"`.
pub fn styles_xml(header_fill: &str, header_font_color: &str) -> String {
    let fill = normalize_color(header_fill, FALLBACK_FILL);
    let font = normalize_color(header_font_color, FALLBACK_FONT);
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <styleSheet xmlns=\"{MAIN_NS}\">\n  \
         <fonts count=\"2\">\n    \
         <font><sz val=\"11\"/><name val=\"Calibri\"/></font>\n    \
         <font><b/><sz val=\"11\"/><color rgb=\"{font}\"/><name val=\"Calibri\"/></font>\n  \
         </fonts>\n  \
         <fills count=\"3\">\n    \
         <fill><patternFill patternType=\"none\"/></fill>\n    \
         <fill><patternFill patternType=\"gray125\"/></fill>\n    \
         <fill><patternFill patternType=\"solid\"><fgColor rgb=\"{fill}\"/>\
         <bgColor indexed=\"64\"/></patternFill></fill>\n  \
         </fills>\n  \
         <borders count=\"1\">\
         <border><left/><right/><top/><bottom/><diagonal/></border>\
         </borders>\n  \
         <cellStyleXfs count=\"1\">\
         <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/>\
         </cellStyleXfs>\n  \
         <cellXfs count=\"2\">\n    \
         <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>\n    \
         <xf numFmtId=\"0\" fontId=\"1\" fillId=\"2\" borderId=\"0\" xfId=\"0\" \
         applyFont=\"1\" applyFill=\"1\"/>\n  \
         </cellXfs>\n\
         </styleSheet>\n"
    )
}

/// Accepts `RRGGBB` or `AARRGGBB`, with or without `#`; anything else falls
/// back to the default palette entry.
fn normalize_color(hex: &str, fallback: &str) -> String {
    let trimmed = hex.trim().trim_start_matches('#');
    let is_hex = trimmed.chars().all(|c| c.is_ascii_hexdigit());
    match trimmed.len() {
        6 if is_hex => format!("FF{}", trimmed.to_ascii_uppercase()),
        8 if is_hex => trimmed.to_ascii_uppercase(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Sheet {
        Sheet {
            name: "DATA".to_string(),
            header: vec!["id".to_string(), "name".to_string()],
            rows: vec![
                vec![SheetCell::Int(1), SheetCell::Text("a & b".to_string())],
                vec![SheetCell::Number(2.5), SheetCell::Empty],
            ],
            freeze: Some((0, 1)),
            autofilter: true,
        }
    }

    #[test]
    fn column_letters_roll_over() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn cell_refs_are_one_based() {
        assert_eq!(cell_ref(0, 0), "A1");
        assert_eq!(cell_ref(2, 9), "C10");
    }

    #[test]
    fn worksheet_carries_pane_filter_and_styles() {
        let xml = worksheet_xml(&sheet(), &[10.0, 12.0]).expect("worksheet xml");
        assert!(xml.contains("ySplit=\"1\""));
        assert!(xml.contains("topLeftCell=\"A2\""));
        assert!(xml.contains("state=\"frozen\""));
        assert!(xml.contains("autoFilter ref=\"A1:B3\""));
        assert!(xml.contains("s=\"1\""));
        assert!(xml.contains("customWidth=\"1\""));
    }

    #[test]
    fn text_cells_are_escaped_inline_strings() {
        let xml = worksheet_xml(&sheet(), &[]).expect("worksheet xml");
        assert!(xml.contains("t=\"inlineStr\""));
        assert!(xml.contains("a &amp; b"));
    }

    #[test]
    fn empty_cells_are_omitted() {
        let xml = worksheet_xml(&sheet(), &[]).expect("worksheet xml");
        assert!(!xml.contains("r=\"B3\""));
    }

    #[test]
    fn workbook_lists_sheets_in_order() {
        let xml = workbook_xml(&["DATA".to_string(), "SUMMARY".to_string()]).expect("workbook");
        assert!(xml.contains("name=\"DATA\""));
        assert!(xml.contains("sheetId=\"2\""));
        assert!(xml.contains("r:id=\"rId2\""));
    }

    #[test]
    fn styles_embed_normalized_palette() {
        let xml = styles_xml("4f81bd", "#FFFFFF");
        assert!(xml.contains("FF4F81BD"));
        assert!(xml.contains("FFFFFFFF"));
    }

    #[test]
    fn bad_palette_falls_back() {
        let xml = styles_xml("not-a-color", "zzz");
        assert!(xml.contains(FALLBACK_FILL));
        assert!(xml.contains(FALLBACK_FONT));
    }

    #[test]
    fn rels_reference_every_sheet_and_styles() {
        let xml = workbook_rels_xml(2);
        assert!(xml.contains("Target=\"worksheets/sheet2.xml\""));
        assert!(xml.contains("Id=\"rId3\""));
        assert!(xml.contains("Target=\"styles.xml\""));
    }
}
