// Cursor de filas: cada sección pide su altura y recibe el rango que le toca.

use serde::Serialize;

/// Rango de filas (0-based) reservado por una sección. `len == 0` es válido
/// para secciones vacías.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowSpan {
    pub first: u32,
    pub len: u32,
}

impl RowSpan {
    /// Fila `i` dentro del rango
    pub fn row(&self, i: usize) -> u32 {
        self.first + i as u32
    }

    /// Última fila ocupada (`first` si el rango está vacío)
    pub fn last(&self) -> u32 {
        if self.len == 0 { self.first } else { self.first + self.len - 1 }
    }

    /// Primera fila después del rango
    pub fn end(&self) -> u32 {
        self.first + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, row: u32) -> bool {
        row >= self.first && row < self.end()
    }
}

#[derive(Debug, Clone)]
pub struct RowCursor {
    next: u32,
}

impl RowCursor {
    pub fn new(start: u32) -> Self {
        RowCursor { next: start }
    }

    /// Reserva `height` filas a partir de la posición actual
    pub fn take(&mut self, height: usize) -> RowSpan {
        let span = RowSpan { first: self.next, len: height as u32 };
        self.next += height as u32;
        span
    }

    /// Una sola fila
    pub fn take_one(&mut self) -> u32 {
        self.take(1).first
    }

    /// Deja `rows` filas en blanco
    pub fn skip(&mut self, rows: u32) {
        self.next += rows;
    }

    pub fn position(&self) -> u32 {
        self.next
    }
}
