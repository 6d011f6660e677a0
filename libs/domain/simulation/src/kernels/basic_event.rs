// [libs/domain/simulation/src/kernels/basic_event.rs]
/*!
 * =================================================================
 * APARATO: BASIC-EVENT SAMPLING KERNEL (V10.2 - SILICON ALIGNED)
 * CLASIFICACIÓN: DOMAIN KERNELS (ESTRATO L2)
 * RESPONSABILIDAD: REFRESCO BIT-PARALELO DE BUFFERS BERNOULLI
 *
 * # Mathematical Proof (Per-Item Purity):
 * Cada work-item sintetiza exactamente un bit-pack como función pura
 * de (índice de nodo, slot, batch, bitpack, iteración). No existe
 * estado de PRNG por hilo: la reproducibilidad es bit-perfecta entre
 * ejecuciones con la misma forma de muestreo.
 * =================================================================
 */

use rayon::prelude::*;

use arbol_core_device::range::NdRange;
use arbol_core_sampling::bernoulli::{generate_bitpack, SamplerArgs};
use arbol_core_sampling::bitpack::Bitpack;
use arbol_core_sampling::shape::SampleShape;

use crate::records::BasicEventRecord;

/// Kernel iterable de muestreo de eventos básicos.
///
/// Procesa un lote contiguo de registros cuyos buffers arrancan en el
/// primer slot del lote dentro de la arena.
#[derive(Debug)]
pub struct BasicEventKernel<B: Bitpack> {
    records: Vec<BasicEventRecord>,
    shape: SampleShape,
    nd_range: NdRange,
    _bitpack: std::marker::PhantomData<B>,
}

impl<B: Bitpack> BasicEventKernel<B> {
    pub fn new(records: Vec<BasicEventRecord>, shape: SampleShape, nd_range: NdRange) -> Self {
        Self {
            records,
            shape,
            nd_range,
            _bitpack: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn num_events(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[BasicEventRecord] {
        &self.records
    }

    /// Refresca todos los buffers del lote para la iteración dada.
    ///
    /// `writable` es la región de escritura de la arena alineada al
    /// primer buffer del lote; los buffers del lote son contiguos.
    pub fn execute(&self, writable: &mut [B], iteration: u32) {
        let buffer_len = self.shape.num_bitpacks();
        let bitpacks_per_batch = self.shape.bitpacks_per_batch;
        let tile_width = self.nd_range.local.bitpacks;
        let own_region = &mut writable[..self.records.len() * buffer_len];

        own_region
            .par_chunks_mut(buffer_len)
            .enumerate()
            .for_each(|(event_slot, event_buffer)| {
                let record = &self.records[event_slot];
                event_buffer
                    .par_chunks_mut(bitpacks_per_batch)
                    .enumerate()
                    .for_each(|(batch_id, batch_row)| {
                        for (group_z, tile) in batch_row.chunks_mut(tile_width).enumerate() {
                            for (lane, word) in tile.iter_mut().enumerate() {
                                let sampler_args = SamplerArgs {
                                    node_index: record.node_index as u32,
                                    event_slot: event_slot as u32,
                                    batch_id: batch_id as u32,
                                    bitpack_idx: (group_z * tile_width + lane) as u32,
                                    iteration,
                                };
                                *word = generate_bitpack::<B>(&sampler_args, record.probability);
                            }
                        }
                    });
            });
    }
}
