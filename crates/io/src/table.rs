use std::collections::HashMap;

/// A loaded roster file: one header row plus data rows, all values as text.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Iterate data rows as column-name → value maps, the shape the
    /// reconciler consumes. Empty cells, cells under an empty header, and
    /// cells beyond the header width are omitted.
    pub fn field_maps(&self) -> impl Iterator<Item = HashMap<String, String>> + '_ {
        self.rows.iter().map(move |row| {
            let mut fields = HashMap::new();
            for (i, header) in self.headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                if let Some(value) = row.get(i) {
                    if !value.is_empty() {
                        fields.insert(header.clone(), value.clone());
                    }
                }
            }
            fields
        })
    }
}
