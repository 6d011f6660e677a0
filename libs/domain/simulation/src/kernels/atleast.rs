// [libs/domain/simulation/src/kernels/atleast.rs]
/*!
 * =================================================================
 * APARATO: K-OF-N POPULATION KERNEL (V9.1 - OVERFLOW HARDENED)
 * CLASIFICACIÓN: DOMAIN KERNELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTEO POR POSICIÓN DE BIT CONTRA UMBRAL K
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PER-BIT COUNTING: Un vector de W contadores u16 acumula, por
 *    posición de bit p, cuántos insumos están encendidos en p tras
 *    aplicar el offset de negaciones; el bit p de salida se enciende
 *    si contador[p] >= k.
 * 2. WIDTH DISCIPLINE: u16 acota N a 65535 entradas; el constructor
 *    de la cola rechaza compuertas mayores antes del despegue.
 * 3. DEGENERATE THRESHOLDS: k=0 produce todo-unos y k>N todo-ceros
 *    sin necesidad de cortocircuito.
 *
 * # Semantics:
 * k=0 -> siempre uno; k=1 -> OR; k=n -> AND; k=n+1 -> siempre cero.
 * =================================================================
 */

use rayon::prelude::*;

use arbol_core_device::range::NdRange;
use arbol_core_sampling::bitpack::Bitpack;
use arbol_core_sampling::shape::SampleShape;

use crate::buffers::input_slice;
use crate::records::AtleastGateRecord;

/// Ancho máximo del vector de contadores por posición de bit.
const MAX_BITPACK_WIDTH: usize = 64;

/// Kernel single-shot de compuertas K-de-N.
#[derive(Debug)]
pub struct AtleastKernel<B: Bitpack> {
    records: Vec<AtleastGateRecord>,
    shape: SampleShape,
    nd_range: NdRange,
    _bitpack: std::marker::PhantomData<B>,
}

impl<B: Bitpack> AtleastKernel<B> {
    pub fn new(records: Vec<AtleastGateRecord>, shape: SampleShape, nd_range: NdRange) -> Self {
        Self {
            records,
            shape,
            nd_range,
            _bitpack: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn num_gates(&self) -> usize {
        self.records.len()
    }

    /// Computa el word de salida en `index` contando por posición.
    #[inline(always)]
    fn count_at(record: &AtleastGateRecord, inputs: &[&[B]], index: usize) -> B {
        let mut accumulated_counts = [0u16; MAX_BITPACK_WIDTH];
        let threshold = record.min_number;
        let offset = record.gate.negated_inputs_offset;

        for input in &inputs[..offset] {
            let value = input[index];
            for position in 0..B::BITS {
                accumulated_counts[position as usize] += u16::from(value.bit_at(position));
            }
        }
        for input in &inputs[offset..] {
            let value = !input[index];
            for position in 0..B::BITS {
                accumulated_counts[position as usize] += u16::from(value.bit_at(position));
            }
        }

        let mut result = B::ZERO;
        for position in 0..B::BITS {
            if accumulated_counts[position as usize] >= threshold {
                result |= B::from_nibble(1) << position;
            }
        }
        result
    }

    /// Ejecuta el lote con la misma disciplina de región que las
    /// compuertas lógicas.
    pub fn execute(&self, earlier: &[B], writable: &mut [B]) {
        let buffer_len = self.shape.num_bitpacks();
        let bitpacks_per_batch = self.shape.bitpacks_per_batch;
        let tile_width = self.nd_range.local.bitpacks;
        let own_region = &mut writable[..self.records.len() * buffer_len];

        own_region
            .par_chunks_mut(buffer_len)
            .enumerate()
            .for_each(|(gate_slot, gate_buffer)| {
                let record = &self.records[gate_slot];
                let inputs: Vec<&[B]> = record
                    .gate
                    .inputs
                    .iter()
                    .map(|&slot| input_slice(earlier, slot, buffer_len))
                    .collect();

                gate_buffer
                    .par_chunks_mut(bitpacks_per_batch)
                    .enumerate()
                    .for_each(|(batch_id, batch_row)| {
                        let row_base = batch_id * bitpacks_per_batch;
                        for (group_z, tile) in batch_row.chunks_mut(tile_width).enumerate() {
                            for (lane, word) in tile.iter_mut().enumerate() {
                                let index = row_base + group_z * tile_width + lane;
                                *word = Self::count_at(record, &inputs, index);
                            }
                        }
                    });
            });
    }
}
