// src/services/quote_builder.rs

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::{
    common::error::AppError,
    models::catalog::Product,
    models::quote::{QuoteLineDraft, QuoteTotals},
};

// Estado do montador. `Committed` é terminal: nenhuma edição volta dele.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Empty,
    Editing,
    Validated,
    Committed,
}

// Resultado de uma edição de célula. O clamp de estoque é um aviso para a
// interface, não um erro: o valor aplicado já foi corrigido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellUpdate {
    Applied {
        cantidad: i64,
    },
    Clamped {
        solicitado: i64,
        aplicado: i64,
        disponible: i64,
    },
}

// Um ambiente da cotação: o número é o rótulo de criação (1-based,
// monotônico, nunca reutilizado) e as células guardam cantidad por produto.
#[derive(Debug, Clone)]
struct Room {
    numero: u32,
    cantidades: HashMap<i64, i64>,
}

/// Grade em memória de (ambiente × produto) sobre um snapshot do catálogo.
///
/// O snapshot congela estoque e custo no momento da criação: os preços
/// gravados na confirmação são os daqui, independentes de edições
/// posteriores do catálogo.
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
    productos: Vec<Product>,
    rooms: Vec<Room>,
    proximo_ambiente: u32,
    estado: BuilderState,
}

impl QuoteBuilder {
    pub fn new(productos: Vec<Product>) -> Self {
        Self {
            productos,
            rooms: Vec::new(),
            proximo_ambiente: 1,
            estado: BuilderState::Empty,
        }
    }

    pub fn state(&self) -> BuilderState {
        self.estado
    }

    pub fn productos(&self) -> &[Product] {
        &self.productos
    }

    fn ensure_editable(&self) -> Result<(), AppError> {
        if self.estado == BuilderState::Committed {
            return Err(AppError::QuoteAlreadyCommitted);
        }
        Ok(())
    }

    fn producto(&self, producto_id: i64) -> Result<&Product, AppError> {
        self.productos
            .iter()
            .find(|p| p.id == producto_id)
            .ok_or_else(|| AppError::ProductNotFound(format!("id {}", producto_id)))
    }

    /// Acrescenta um ambiente vazio e devolve o seu número.
    pub fn add_room(&mut self) -> Result<u32, AppError> {
        self.ensure_editable()?;

        let numero = self.proximo_ambiente;
        self.proximo_ambiente += 1;
        self.rooms.push(Room {
            numero,
            cantidades: HashMap::new(),
        });
        self.estado = BuilderState::Editing;

        Ok(numero)
    }

    /// Define a cantidad de um produto em um ambiente.
    ///
    /// Se a soma nos DEMAIS ambientes mais o valor pedido passar do estoque,
    /// a célula é ajustada para o que ainda está disponível e o chamador
    /// recebe `CellUpdate::Clamped` para avisar o usuário.
    pub fn set_cell(
        &mut self,
        ambiente: u32,
        producto_id: i64,
        cantidad: i64,
    ) -> Result<CellUpdate, AppError> {
        self.ensure_editable()?;

        if cantidad < 0 {
            return Err(AppError::InvalidQuantity(cantidad));
        }

        let stock = self.producto(producto_id)?.unidades;

        if !self.rooms.iter().any(|r| r.numero == ambiente) {
            return Err(AppError::RoomNotFound(ambiente));
        }

        let otros: i64 = self
            .rooms
            .iter()
            .filter(|r| r.numero != ambiente)
            .map(|r| r.cantidades.get(&producto_id).copied().unwrap_or(0))
            .sum();
        let disponible = (stock - otros).max(0);

        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.numero == ambiente)
            .ok_or(AppError::RoomNotFound(ambiente))?;

        let update = if cantidad > disponible {
            tracing::warn!(
                ambiente,
                producto_id,
                solicitado = cantidad,
                aplicado = disponible,
                "Cantidad acima do estoque disponível; célula ajustada"
            );
            room.cantidades.insert(producto_id, disponible);
            CellUpdate::Clamped {
                solicitado: cantidad,
                aplicado: disponible,
                disponible,
            }
        } else {
            room.cantidades.insert(producto_id, cantidad);
            CellUpdate::Applied { cantidad }
        };

        self.estado = BuilderState::Editing;
        Ok(update)
    }

    /// Soma da cantidad de um produto em todos os ambientes.
    pub fn total_por_producto(&self, producto_id: i64) -> i64 {
        self.rooms
            .iter()
            .map(|r| r.cantidades.get(&producto_id).copied().unwrap_or(0))
            .sum()
    }

    /// Pares (producto_id, cantidad total) com cantidad > 0, na ordem do
    /// catálogo. É o que a confirmação baixa do estoque.
    pub fn totals_by_product(&self) -> Vec<(i64, i64)> {
        self.productos
            .iter()
            .map(|p| (p.id, self.total_por_producto(p.id)))
            .filter(|(_, cantidad)| *cantidad > 0)
            .collect()
    }

    /// Subtotal, IVA e total da grade atual. Puro: pode ser chamado quantas
    /// vezes for preciso sem alterar nada.
    pub fn compute_totals(&self) -> QuoteTotals {
        let subtotal: Decimal = self
            .productos
            .iter()
            .map(|p| Decimal::from(self.total_por_producto(p.id)) * p.costo)
            .sum();

        QuoteTotals::from_subtotal(subtotal)
    }

    /// Reconfere toda a grade contra o estoque do snapshot e, estando tudo
    /// dentro do limite, avança para `Validated`.
    pub fn validate(&mut self) -> Result<BuilderState, AppError> {
        self.ensure_editable()?;

        if !self.rooms.is_empty()
            && self
                .productos
                .iter()
                .all(|p| self.total_por_producto(p.id) <= p.unidades)
        {
            self.estado = BuilderState::Validated;
        }

        Ok(self.estado)
    }

    /// Linhas prontas para persistência: uma por célula com cantidad > 0,
    /// com o preço do snapshot. Ambientes totalmente zerados somem daqui.
    pub fn draft_lines(&self) -> Vec<QuoteLineDraft> {
        let mut lines = Vec::new();
        for room in &self.rooms {
            for producto in &self.productos {
                let cantidad = room.cantidades.get(&producto.id).copied().unwrap_or(0);
                if cantidad > 0 {
                    lines.push(QuoteLineDraft {
                        ambiente: room.numero,
                        producto_id: producto.id,
                        cantidad,
                        precio_unitario: producto.costo,
                    });
                }
            }
        }
        lines
    }

    // A transição para Committed é exclusiva do QuoteService, depois da
    // persistência dar certo.
    pub(crate) fn mark_committed(&mut self) {
        self.estado = BuilderState::Committed;
    }
}
