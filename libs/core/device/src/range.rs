// [libs/core/device/src/range.rs]
/*!
 * =================================================================
 * APARATO: ND-RANGE GEOMETRY (V4.0 - SOBERANO)
 * CLASIFICACIÓN: CORE DEVICE (ESTRATO L1)
 * RESPONSABILIDAD: RANGOS 3D (EVENTOS × BATCH × BITPACKS)
 * =================================================================
 */

/// Rango tridimensional sobre los ejes (eventos, batch, bitpacks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range3 {
    pub events: usize,
    pub batch: usize,
    pub bitpacks: usize,
}

impl Range3 {
    pub const fn new(events: usize, batch: usize, bitpacks: usize) -> Self {
        Self {
            events,
            batch,
            bitpacks,
        }
    }

    /// Rango nulo: actúa como "sin límite" en la negociación de formas.
    pub const fn unbounded() -> Self {
        Self::new(0, 0, 0)
    }

    /// Número total de work-items del rango.
    #[inline]
    pub fn product(&self) -> usize {
        self.events * self.batch * self.bitpacks
    }
}

/// Par (rango global, rango local) con el global acolchado a múltiplos
/// del local en cada eje.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NdRange {
    pub global: Range3,
    pub local: Range3,
}

impl NdRange {
    /// Acolcha los tamaños naturales hacia arriba a múltiplos del local.
    pub fn padded(natural: Range3, local: Range3) -> Self {
        let round_up = |size: usize, tile: usize| -> usize { size.div_ceil(tile) * tile };
        Self {
            global: Range3::new(
                round_up(natural.events, local.events),
                round_up(natural.batch, local.batch),
                round_up(natural.bitpacks, local.bitpacks),
            ),
            local,
        }
    }

    /// Número de work-groups por eje.
    #[inline]
    pub fn num_groups(&self) -> Range3 {
        Range3::new(
            self.global.events / self.local.events,
            self.global.batch / self.local.batch,
            self.global.bitpacks / self.local.bitpacks,
        )
    }
}
