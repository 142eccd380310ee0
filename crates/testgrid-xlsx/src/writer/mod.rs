//! XLSX writer

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use testgrid_core::{CellAddress, CellValue, Workbook, Worksheet};

/// XLSX file writer
///
/// Produces a minimal package: content types, relationships, the workbook
/// part, a default style sheet and one part per worksheet. Strings are
/// written inline.
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write(workbook, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize a workbook into an in-memory buffer
    pub fn to_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let mut buf = Vec::new();
        Self::write(workbook, Cursor::new(&mut buf))?;
        Ok(buf)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat(
                "a workbook needs at least one worksheet".into(),
            ));
        }

        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_styles_xml(&mut zip)?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            Self::write_worksheet(&mut zip, sheet, i)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                Self::escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        let styles_rid = workbook.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            styles_rid
        ));

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// The smallest style sheet spreadsheet applications accept: one font,
    /// the two mandatory fills, one border and a single cell format.
    fn write_styles_xml<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/><family val="2"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Worksheet,
        index: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
        );

        // Rows without cells are still written so that they keep existing
        for row in sheet.rows() {
            if row.is_empty() {
                content.push_str(&format!("\n        <row r=\"{}\"/>", row.index() + 1));
                continue;
            }

            content.push_str(&format!("\n        <row r=\"{}\">", row.index() + 1));
            for (col, value) in row.cells() {
                let cell_ref = CellAddress::new(row.index(), col).to_a1_string();
                content.push_str("\n            ");
                content.push_str(&Self::cell_xml(&cell_ref, value));
            }
            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn cell_xml(cell_ref: &str, value: &CellValue) -> String {
        match value {
            CellValue::Blank => format!("<c r=\"{}\"/>", cell_ref),
            CellValue::String(s) => format!(
                "<c r=\"{}\" t=\"inlineStr\"><is>{}</is></c>",
                cell_ref,
                Self::text_element(s)
            ),
            CellValue::Number(n) if n.is_finite() => {
                format!("<c r=\"{}\"><v>{}</v></c>", cell_ref, n)
            }
            // NaN and infinities have no representation in the file format
            CellValue::Number(_) => format!("<c r=\"{}\" t=\"e\"><v>#NUM!</v></c>", cell_ref),
            CellValue::Boolean(b) => format!(
                "<c r=\"{}\" t=\"b\"><v>{}</v></c>",
                cell_ref,
                if *b { 1 } else { 0 }
            ),
            CellValue::Error(e) => format!(
                "<c r=\"{}\" t=\"e\"><v>{}</v></c>",
                cell_ref,
                Self::escape_xml(e)
            ),
            CellValue::Formula { text, cached_value } => {
                let formula = Self::escape_xml(text.strip_prefix('=').unwrap_or(text));
                match cached_value.as_deref() {
                    Some(CellValue::String(s)) => format!(
                        "<c r=\"{}\" t=\"str\"><f>{}</f><v>{}</v></c>",
                        cell_ref,
                        formula,
                        Self::escape_xml(&Self::encode_excel_escapes(s))
                    ),
                    Some(CellValue::Number(n)) if n.is_finite() => format!(
                        "<c r=\"{}\"><f>{}</f><v>{}</v></c>",
                        cell_ref, formula, n
                    ),
                    Some(CellValue::Boolean(b)) => format!(
                        "<c r=\"{}\" t=\"b\"><f>{}</f><v>{}</v></c>",
                        cell_ref,
                        formula,
                        if *b { 1 } else { 0 }
                    ),
                    Some(CellValue::Error(e)) => format!(
                        "<c r=\"{}\" t=\"e\"><f>{}</f><v>{}</v></c>",
                        cell_ref,
                        formula,
                        Self::escape_xml(e)
                    ),
                    _ => format!("<c r=\"{}\"><f>{}</f></c>", cell_ref, formula),
                }
            }
        }
    }

    /// `<t>` element for a string, preserving surrounding whitespace
    fn text_element(s: &str) -> String {
        let text = Self::escape_xml(&Self::encode_excel_escapes(s));
        if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
            format!("<t xml:space=\"preserve\">{}</t>", text)
        } else {
            format!("<t>{}</t>", text)
        }
    }

    /// Inverse of the reader's `_xHHHH_` decoding.
    ///
    /// Control characters XML 1.0 cannot carry are written as `_xHHHH_`, and
    /// a literal `_x` that would otherwise be read back as an escape gets its
    /// underscore escaped as `_x005F_`.
    fn encode_excel_escapes(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for (i, c) in s.char_indices() {
            match c {
                '\t' | '\n' | '\r' => result.push(c),
                c if (c as u32) < 0x20 => result.push_str(&format!("_x{:04X}_", c as u32)),
                '_' if Self::looks_like_escape(&s[i..]) => result.push_str("_x005F_"),
                c => result.push(c),
            }
        }
        result
    }

    fn looks_like_escape(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() >= 7
            && bytes[1] == b'x'
            && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
            && bytes[6] == b'_'
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }
}
