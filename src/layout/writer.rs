//! Superficie de escritura de documentos. La maquetación sólo conoce estos
//! traits; `XlsxDocument` los implementa sobre rust_xlsxwriter y
//! `MemoryDocument` (ver `memory`) los registra en memoria.

use std::path::Path;
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, FormatAlign, FormatBorder, Image, Workbook, Worksheet};
use crate::error::{GenerationError, Result};

/// Estilos semánticos de celda usados por las plantillas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum CellStyle {
    /// Cabecera negra, fuente 12
    HeaderSmall,
    /// Cabecera negra, fuente 18
    HeaderMedium,
    /// Cabecera negra, fuente 28
    HeaderBig,
    /// Título gris centrado
    Title,
    /// Título verde centrado (blueprint)
    TitleGreen,
    /// Título gris alineado a la izquierda
    TitleLeft,
    /// Título sin relleno, negrita centrada
    TitleCenter,
    /// Texto centrado con borde
    Text,
    /// Texto a la izquierda con borde
    TextLeft,
    /// Texto al pie de la celda (firmas)
    TextSignature,
    Percent,
    PercentBold,
    PercentBoldFill,
    /// Fecha centrada, `dd-mm-yyyy`
    Date,
}

pub trait SheetWriter {
    fn write_text(&mut self, row: u32, col: u16, text: &str, style: CellStyle) -> Result<()>;
    fn write_number(&mut self, row: u32, col: u16, value: f64, style: CellStyle) -> Result<()>;
    /// Combina el rango (inclusivo) y escribe `text` en él. Un rango de una
    /// sola celda equivale a `write_text`.
    fn merge(
        &mut self,
        first_row: u32,
        first_col: u16,
        last_row: u32,
        last_col: u16,
        text: &str,
        style: CellStyle,
    ) -> Result<()>;
    /// Como `merge`, pero el valor es una fecha de Excel
    fn merge_date(
        &mut self,
        first_row: u32,
        first_col: u16,
        last_row: u32,
        last_col: u16,
        date: NaiveDate,
        style: CellStyle,
    ) -> Result<()>;
    fn set_column_width(&mut self, first_col: u16, last_col: u16, width: f64) -> Result<()>;
    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()>;
    fn insert_logo(&mut self, row: u32, col: u16, path: &Path) -> Result<()>;
}

impl<T: SheetWriter + ?Sized> SheetWriter for &mut T {
    fn write_text(&mut self, row: u32, col: u16, text: &str, style: CellStyle) -> Result<()> {
        (**self).write_text(row, col, text, style)
    }
    fn write_number(&mut self, row: u32, col: u16, value: f64, style: CellStyle) -> Result<()> {
        (**self).write_number(row, col, value, style)
    }
    fn merge(&mut self, first_row: u32, first_col: u16, last_row: u32, last_col: u16, text: &str, style: CellStyle) -> Result<()> {
        (**self).merge(first_row, first_col, last_row, last_col, text, style)
    }
    fn merge_date(&mut self, first_row: u32, first_col: u16, last_row: u32, last_col: u16, date: NaiveDate, style: CellStyle) -> Result<()> {
        (**self).merge_date(first_row, first_col, last_row, last_col, date, style)
    }
    fn set_column_width(&mut self, first_col: u16, last_col: u16, width: f64) -> Result<()> {
        (**self).set_column_width(first_col, last_col, width)
    }
    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        (**self).set_row_height(row, height)
    }
    fn insert_logo(&mut self, row: u32, col: u16, path: &Path) -> Result<()> {
        (**self).insert_logo(row, col, path)
    }
}

pub trait DocumentWriter {
    type Sheet<'a>: SheetWriter
    where
        Self: 'a;

    fn add_sheet(&mut self, name: &str) -> Result<Self::Sheet<'_>>;
}

/// Valida el orden de un rango antes de combinarlo
pub(crate) fn check_range(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Result<()> {
    if last_row < first_row || last_col < first_col {
        return Err(GenerationError::Layout(format!(
            "rango inválido ({},{})-({},{})",
            first_row, first_col, last_row, last_col
        )));
    }
    Ok(())
}

/// Formatos reutilizables (fuente Tahoma, borde fino)
struct StyleBook {
    header_small: Format,
    header_medium: Format,
    header_big: Format,
    title: Format,
    title_green: Format,
    title_left: Format,
    title_center: Format,
    text: Format,
    text_left: Format,
    text_signature: Format,
    percent: Format,
    percent_bold: Format,
    percent_bold_fill: Format,
    date: Format,
}

impl StyleBook {
    fn new() -> Self {
        let base = || {
            Format::new()
                .set_font_name("Tahoma")
                .set_font_size(12.0)
                .set_border(FormatBorder::Thin)
                .set_font_color(0x000000)
        };
        let header = |size: f64| {
            base()
                .set_font_size(size)
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_font_color(0xFFFFFF)
                .set_background_color(0x000000)
        };
        let title = || {
            base()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap()
        };
        let centered = || base().set_align(FormatAlign::Center).set_align(FormatAlign::VerticalCenter).set_text_wrap();

        StyleBook {
            header_small: header(12.0).set_text_wrap(),
            header_medium: header(18.0),
            header_big: header(28.0),
            title: title().set_background_color(0xC0C0C0),
            title_green: title().set_background_color(0x008000),
            title_left: base()
                .set_bold()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color(0xC0C0C0),
            title_center: title(),
            text: centered(),
            text_left: base().set_align(FormatAlign::Left).set_align(FormatAlign::VerticalCenter).set_text_wrap(),
            text_signature: base().set_align(FormatAlign::Center).set_align(FormatAlign::Bottom),
            percent: centered().set_num_format("0%"),
            percent_bold: title().set_num_format("0%"),
            percent_bold_fill: title().set_num_format("0%").set_background_color(0xC0C0C0),
            date: centered().set_num_format("dd-mm-yyyy"),
        }
    }

    fn get(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::HeaderSmall => &self.header_small,
            CellStyle::HeaderMedium => &self.header_medium,
            CellStyle::HeaderBig => &self.header_big,
            CellStyle::Title => &self.title,
            CellStyle::TitleGreen => &self.title_green,
            CellStyle::TitleLeft => &self.title_left,
            CellStyle::TitleCenter => &self.title_center,
            CellStyle::Text => &self.text,
            CellStyle::TextLeft => &self.text_left,
            CellStyle::TextSignature => &self.text_signature,
            CellStyle::Percent => &self.percent,
            CellStyle::PercentBold => &self.percent_bold,
            CellStyle::PercentBoldFill => &self.percent_bold_fill,
            CellStyle::Date => &self.date,
        }
    }
}

/// Documento `.xlsx` en memoria
pub struct XlsxDocument {
    workbook: Workbook,
    styles: StyleBook,
}

impl XlsxDocument {
    pub fn new() -> Self {
        XlsxDocument { workbook: Workbook::new(), styles: StyleBook::new() }
    }

    /// Serializa el workbook completo
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        Ok(self.workbook.save_to_buffer()?)
    }
}

impl Default for XlsxDocument {
    fn default() -> Self {
        Self::new()
    }
}

pub struct XlsxSheet<'a> {
    sheet: &'a mut Worksheet,
    styles: &'a StyleBook,
}

impl DocumentWriter for XlsxDocument {
    type Sheet<'a> = XlsxSheet<'a>;

    fn add_sheet(&mut self, name: &str) -> Result<XlsxSheet<'_>> {
        let sheet = self.workbook.add_worksheet();
        sheet.set_name(name)?;
        Ok(XlsxSheet { sheet, styles: &self.styles })
    }
}

impl SheetWriter for XlsxSheet<'_> {
    fn write_text(&mut self, row: u32, col: u16, text: &str, style: CellStyle) -> Result<()> {
        self.sheet.write_string_with_format(row, col, text, self.styles.get(style))?;
        Ok(())
    }

    fn write_number(&mut self, row: u32, col: u16, value: f64, style: CellStyle) -> Result<()> {
        self.sheet.write_number_with_format(row, col, value, self.styles.get(style))?;
        Ok(())
    }

    fn merge(&mut self, first_row: u32, first_col: u16, last_row: u32, last_col: u16, text: &str, style: CellStyle) -> Result<()> {
        check_range(first_row, first_col, last_row, last_col)?;
        if first_row == last_row && first_col == last_col {
            return self.write_text(first_row, first_col, text, style);
        }
        self.sheet
            .merge_range(first_row, first_col, last_row, last_col, text, self.styles.get(style))?;
        Ok(())
    }

    fn merge_date(&mut self, first_row: u32, first_col: u16, last_row: u32, last_col: u16, date: NaiveDate, style: CellStyle) -> Result<()> {
        check_range(first_row, first_col, last_row, last_col)?;
        let format = self.styles.get(style);
        if first_row != last_row || first_col != last_col {
            self.sheet.merge_range(first_row, first_col, last_row, last_col, "", format)?;
        }
        let value = ExcelDateTime::from_ymd(date.year() as u16, date.month() as u8, date.day() as u8)?;
        self.sheet.write_datetime_with_format(first_row, first_col, &value, format)?;
        Ok(())
    }

    fn set_column_width(&mut self, first_col: u16, last_col: u16, width: f64) -> Result<()> {
        for c in first_col..=last_col {
            self.sheet.set_column_width(c, width)?;
        }
        Ok(())
    }

    fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.sheet.set_row_height(row, height)?;
        Ok(())
    }

    fn insert_logo(&mut self, row: u32, col: u16, path: &Path) -> Result<()> {
        let image = Image::new(path)?.set_scale_width(1.5).set_scale_height(1.5);
        self.sheet.insert_image_with_offset(row, col, &image, 10, 2)?;
        Ok(())
    }
}
