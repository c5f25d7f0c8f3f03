// src/services/document_service.rs

use chrono::{DateTime, Local, Utc};
use genpdf::{Element, elements, style};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::{
    common::error::AppError,
    models::quote::{ClientInfo, Quote, QuoteLineDetail},
};

// ---
// Modelo imprimível
// ---
// Contrato de entrada do renderizador: tudo o que o PDF mostra já vem
// montado aqui, sem acesso a banco. A montagem é pura e testável.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRow {
    pub producto: String,
    pub cantidad: i64,
    pub precio_unitario: Decimal,
    pub total_linea: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSection {
    pub numero: i64,
    pub filas: Vec<DocumentRow>,
}

#[derive(Debug, Clone)]
pub struct QuoteDocument {
    pub cotizacion_id: i64,
    pub fecha: DateTime<Utc>,
    pub cliente: ClientInfo,
    pub ambientes: Vec<RoomSection>,
    pub subtotal: Decimal,
    pub iva: Decimal,
    pub total: Decimal,
}

impl QuoteDocument {
    /// Agrupa as linhas persistidas por ambiente. Só entram ambientes com
    /// linhas (os zerados nunca chegaram ao banco).
    pub fn build(quote: &Quote, lines: &[QuoteLineDetail]) -> Self {
        let mut ambientes: Vec<RoomSection> = Vec::new();

        for line in lines {
            let fila = DocumentRow {
                producto: line.producto.clone(),
                cantidad: line.cantidad,
                precio_unitario: line.precio_unitario,
                total_linea: Decimal::from(line.cantidad) * line.precio_unitario,
            };

            match ambientes.last_mut() {
                Some(section) if section.numero == line.ambiente => section.filas.push(fila),
                _ => ambientes.push(RoomSection {
                    numero: line.ambiente,
                    filas: vec![fila],
                }),
            }
        }

        Self {
            cotizacion_id: quote.id,
            fecha: quote.fecha,
            cliente: quote.cliente.clone(),
            ambientes,
            subtotal: quote.subtotal,
            iva: quote.iva,
            total: quote.total,
        }
    }
}

fn money(value: Decimal) -> String {
    format!("$ {:.2}", value)
}

// ---
// Renderização
// ---

#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: PathBuf,
    downloads_dir: PathBuf,
}

impl DocumentService {
    pub fn new(fonts_dir: PathBuf, downloads_dir: PathBuf) -> Self {
        Self {
            fonts_dir,
            downloads_dir,
        }
    }

    /// Renderiza o PDF da cotação para um buffer em memória.
    pub fn render(&self, doc: &QuoteDocument) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta configurada
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "LiberationSans", None)
            .map_err(|_| {
                AppError::FontNotFound(format!(
                    "Fonte não encontrada em {}",
                    self.fonts_dir.display()
                ))
            })?;

        let mut pdf = genpdf::Document::new(font_family);
        pdf.set_title(format!("Cotización #{}", doc.cotizacion_id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        pdf.set_page_decorator(decorator);

        pdf.push(
            elements::Paragraph::new("Cotización de Productos")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        pdf.push(elements::Paragraph::new(format!(
            "Cotización #{} - Fecha: {}",
            doc.cotizacion_id,
            doc.fecha.format("%d/%m/%Y")
        )));
        pdf.push(elements::Break::new(1.5));

        // --- BLOCO DO CLIENTE ---
        pdf.push(
            elements::Paragraph::new("Cliente")
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        pdf.push(elements::Paragraph::new(format!(
            "{} {}",
            doc.cliente.nombres, doc.cliente.apellidos
        )));
        pdf.push(elements::Paragraph::new(format!(
            "{}: {}",
            doc.cliente.tipo_documento, doc.cliente.numero_documento
        )));
        pdf.push(elements::Paragraph::new(format!(
            "Tel: {} / {}",
            doc.cliente.telefono, doc.cliente.email
        )));
        pdf.push(elements::Break::new(1.5));

        // --- UMA TABELA POR AMBIENTE ---
        // Pesos das colunas: Producto (4), Cantidad (1), Unitario (2), Total (2)
        let style_bold = style::Style::new().bold();
        for section in &doc.ambientes {
            pdf.push(
                elements::Paragraph::new(format!("Ambiente {}", section.numero))
                    .styled(style::Style::new().bold().with_font_size(12)),
            );

            let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
            table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

            table
                .row()
                .element(elements::Paragraph::new("Producto").styled(style_bold))
                .element(elements::Paragraph::new("Cantidad").styled(style_bold))
                .element(elements::Paragraph::new("Unitario").styled(style_bold))
                .element(elements::Paragraph::new("Total").styled(style_bold))
                .push()
                .expect("Table error");

            for fila in &section.filas {
                table
                    .row()
                    .element(elements::Paragraph::new(fila.producto.clone()))
                    .element(elements::Paragraph::new(fila.cantidad.to_string()))
                    .element(elements::Paragraph::new(money(fila.precio_unitario)))
                    .element(elements::Paragraph::new(money(fila.total_linea)))
                    .push()
                    .expect("Table row error");
            }

            pdf.push(table);
            pdf.push(elements::Break::new(1));
        }

        // --- TOTAIS ---
        let mut subtotal_par =
            elements::Paragraph::new(format!("Subtotal: {}", money(doc.subtotal)));
        subtotal_par.set_alignment(genpdf::Alignment::Right);
        pdf.push(subtotal_par);

        let mut iva_par = elements::Paragraph::new(format!("IVA (19%): {}", money(doc.iva)));
        iva_par.set_alignment(genpdf::Alignment::Right);
        pdf.push(iva_par);

        let mut total_par = elements::Paragraph::new(format!("TOTAL: {}", money(doc.total)));
        total_par.set_alignment(genpdf::Alignment::Right);
        pdf.push(total_par.styled(style::Style::new().bold().with_font_size(12)));

        let mut buffer = Vec::new();
        pdf.render(&mut buffer)
            .map_err(|e| AppError::PdfError(e.to_string()))?;

        Ok(buffer)
    }

    /// Renderiza e grava o PDF no diretório de downloads configurado, com
    /// nome de arquivo carimbado com a hora da geração.
    pub fn write_to_downloads(&self, doc: &QuoteDocument) -> Result<PathBuf, AppError> {
        let bytes = self.render(doc)?;

        fs::create_dir_all(&self.downloads_dir).map_err(|e| {
            anyhow::anyhow!(
                "Falha ao criar o diretório {}: {}",
                self.downloads_dir.display(),
                e
            )
        })?;

        let filename = format!("cotizacion_{}.pdf", Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.downloads_dir.join(filename);

        fs::write(&path, &bytes)
            .map_err(|e| anyhow::anyhow!("Falha ao escrever o PDF em {}: {}", path.display(), e))?;

        tracing::info!(arquivo = %path.display(), "📄 PDF da cotação gerado");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cliente() -> ClientInfo {
        ClientInfo {
            tipo_documento: "CC".to_string(),
            numero_documento: "1012345678".to_string(),
            nombres: "Laura".to_string(),
            apellidos: "Gómez".to_string(),
            telefono: "3001234567".to_string(),
            email: "laura@example.com".to_string(),
        }
    }

    fn quote() -> Quote {
        Quote {
            id: 42,
            usuario_id: "admin".to_string(),
            fecha: Utc::now(),
            cliente: cliente(),
            subtotal: dec!(446152),
            iva: dec!(84768.88),
            total: dec!(530920.88),
        }
    }

    fn linea(ambiente: i64, producto: &str, cantidad: i64, precio: Decimal) -> QuoteLineDetail {
        QuoteLineDetail {
            ambiente,
            producto: producto.to_string(),
            cantidad,
            precio_unitario: precio,
        }
    }

    #[test]
    fn build_agrupa_linhas_por_ambiente() {
        let lines = vec![
            linea(1, "Google Assistant Nest", 2, dec!(223076)),
            linea(1, "Foco LED RGB Controlado", 1, dec!(61876)),
            linea(3, "Chromecast Serie 3", 4, dec!(223076)),
        ];

        let doc = QuoteDocument::build(&quote(), &lines);

        assert_eq!(doc.ambientes.len(), 2);
        assert_eq!(doc.ambientes[0].numero, 1);
        assert_eq!(doc.ambientes[0].filas.len(), 2);
        // O ambiente 2 nunca teve linhas; o 3 mantém o rótulo original.
        assert_eq!(doc.ambientes[1].numero, 3);
        assert_eq!(doc.ambientes[1].filas.len(), 1);
    }

    #[test]
    fn build_calcula_o_total_de_cada_linha() {
        let lines = vec![linea(1, "Google Assistant Nest", 2, dec!(223076))];
        let doc = QuoteDocument::build(&quote(), &lines);

        let fila = &doc.ambientes[0].filas[0];
        assert_eq!(fila.total_linea, dec!(446152));
        assert_eq!(doc.total, doc.subtotal + doc.iva);
    }

    #[test]
    fn render_sem_fontes_reporta_font_not_found() {
        let service = DocumentService::new(
            PathBuf::from("/caminho/inexistente/fonts"),
            std::env::temp_dir(),
        );
        let doc = QuoteDocument::build(&quote(), &[]);

        assert!(matches!(
            service.render(&doc),
            Err(AppError::FontNotFound(_))
        ));
    }
}
