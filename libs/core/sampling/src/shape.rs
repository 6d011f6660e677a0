// [libs/core/sampling/src/shape.rs]
/*!
 * =================================================================
 * APARATO: SAMPLE SHAPE CONTRACT (V5.0 - SOBERANO)
 * CLASIFICACIÓN: CORE SAMPLING (ESTRATO L1)
 * RESPONSABILIDAD: GEOMETRÍA DEL BUFFER DE MUESTRAS POR EVENTO
 * =================================================================
 */

use crate::bitpack::Bitpack;
use thiserror::Error;

/// Fallos de validación de la geometría de muestreo.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Ambas dimensiones deben ser estrictamente positivas.
    #[error("Dimensión de muestreo nula: batch_size={batch_size}, bitpacks_per_batch={bitpacks_per_batch}")]
    DegenerateDimension {
        batch_size: usize,
        bitpacks_per_batch: usize,
    },
}

/// Geometría del buffer de muestras de un evento.
///
/// El buffer por evento se dispone como `batch_size × bitpacks_per_batch`
/// bit-packs; el total de muestras por evento y por iteración es
/// `batch_size × bitpacks_per_batch × W`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleShape {
    /// Número de batches paralelos por iteración.
    pub batch_size: usize,
    /// Número de bit-packs por batch.
    pub bitpacks_per_batch: usize,
}

impl SampleShape {
    /// Construye una forma validando que ninguna dimensión sea nula.
    pub fn new(batch_size: usize, bitpacks_per_batch: usize) -> Result<Self, ShapeError> {
        if batch_size == 0 || bitpacks_per_batch == 0 {
            return Err(ShapeError::DegenerateDimension {
                batch_size,
                bitpacks_per_batch,
            });
        }
        Ok(Self {
            batch_size,
            bitpacks_per_batch,
        })
    }

    /// Longitud total del buffer por evento, en bit-packs.
    #[inline]
    pub fn num_bitpacks(&self) -> usize {
        self.batch_size * self.bitpacks_per_batch
    }

    /// Muestras producidas por evento en una iteración, en bits.
    #[inline]
    pub fn sampled_bits_per_iteration<B: Bitpack>(&self) -> u64 {
        self.num_bitpacks() as u64 * B::BITS as u64
    }

    /// Bytes del buffer por evento para el word `B`.
    #[inline]
    pub fn bytes_per_event<B: Bitpack>(&self) -> u64 {
        self.num_bitpacks() as u64 * (B::BITS as u64 / 8)
    }

    /// Índice lineal del bit-pack `(batch, bitpack)` dentro del buffer.
    #[inline]
    pub fn linear_index(&self, batch_id: usize, bitpack_idx: usize) -> usize {
        batch_id * self.bitpacks_per_batch + bitpack_idx
    }
}
