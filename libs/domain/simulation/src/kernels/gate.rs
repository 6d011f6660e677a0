// [libs/domain/simulation/src/kernels/gate.rs]
/*!
 * =================================================================
 * APARATO: LOGIC GATE KERNELS (V12.3 - SWISS WATCH SEAL)
 * CLASIFICACIÓN: DOMAIN KERNELS (ESTRATO L2)
 * RESPONSABILIDAD: PLEGADO BITWISE POR CONECTIVA CON NEGACIONES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. COMPILE-TIME DISPATCH: Un kernel monomorfizado por conectiva; el
 *    bucle interno pliega sin switch alguno. El constructor de la cola
 *    selecciona el kernel una sola vez por par (ola, conectiva).
 * 2. NEGATION DISCIPLINE: Los insumos en posiciones >= offset se
 *    complementan antes del plegado; NAND/NOR/NOT invierten el
 *    resultado final.
 * 3. UNARY DEGENERATION: NOT/NULL reciben exactamente una entrada
 *    (exigido aguas arriba); el plegado degenera en una copia.
 * =================================================================
 */

use rayon::prelude::*;

use arbol_core_device::range::NdRange;
use arbol_core_sampling::bitpack::Bitpack;
use arbol_core_sampling::shape::SampleShape;

use arbol_domain_pdag::Connective;

use crate::buffers::{input_slice, BufferId};
use crate::records::GateRecord;

/// Contrato de plegado bitwise de una conectiva.
pub trait BitFold: Send + Sync + 'static {
    /// Conectiva servida por este plegado.
    const CONNECTIVE: Connective;
    /// Inversión final del resultado (NAND, NOR, NOT).
    const POST_INVERT: bool;

    /// Identidad del plegado (todo-unos para AND, cero para OR/XOR).
    fn identity<B: Bitpack>() -> B;

    /// Un paso del plegado sobre un word de insumo.
    fn fold<B: Bitpack>(accumulator: B, value: B) -> B;
}

/// AND: identidad todo-unos, plegado conjuntivo.
#[derive(Debug, Clone, Copy, Default)]
pub struct AndFold;

impl BitFold for AndFold {
    const CONNECTIVE: Connective = Connective::And;
    const POST_INVERT: bool = false;

    #[inline(always)]
    fn identity<B: Bitpack>() -> B {
        B::ONES
    }

    #[inline(always)]
    fn fold<B: Bitpack>(accumulator: B, value: B) -> B {
        accumulator & value
    }
}

/// NAND: plegado conjuntivo con inversión final.
#[derive(Debug, Clone, Copy, Default)]
pub struct NandFold;

impl BitFold for NandFold {
    const CONNECTIVE: Connective = Connective::Nand;
    const POST_INVERT: bool = true;

    #[inline(always)]
    fn identity<B: Bitpack>() -> B {
        B::ONES
    }

    #[inline(always)]
    fn fold<B: Bitpack>(accumulator: B, value: B) -> B {
        accumulator & value
    }
}

/// OR: identidad cero, plegado disyuntivo.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrFold;

impl BitFold for OrFold {
    const CONNECTIVE: Connective = Connective::Or;
    const POST_INVERT: bool = false;

    #[inline(always)]
    fn identity<B: Bitpack>() -> B {
        B::ZERO
    }

    #[inline(always)]
    fn fold<B: Bitpack>(accumulator: B, value: B) -> B {
        accumulator | value
    }
}

/// NOR: plegado disyuntivo con inversión final.
#[derive(Debug, Clone, Copy, Default)]
pub struct NorFold;

impl BitFold for NorFold {
    const CONNECTIVE: Connective = Connective::Nor;
    const POST_INVERT: bool = true;

    #[inline(always)]
    fn identity<B: Bitpack>() -> B {
        B::ZERO
    }

    #[inline(always)]
    fn fold<B: Bitpack>(accumulator: B, value: B) -> B {
        accumulator | value
    }
}

/// XOR: identidad cero, plegado de paridad.
#[derive(Debug, Clone, Copy, Default)]
pub struct XorFold;

impl BitFold for XorFold {
    const CONNECTIVE: Connective = Connective::Xor;
    const POST_INVERT: bool = false;

    #[inline(always)]
    fn identity<B: Bitpack>() -> B {
        B::ZERO
    }

    #[inline(always)]
    fn fold<B: Bitpack>(accumulator: B, value: B) -> B {
        accumulator ^ value
    }
}

/// NOT: copia de la única entrada con inversión final.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFold;

impl BitFold for NotFold {
    const CONNECTIVE: Connective = Connective::Not;
    const POST_INVERT: bool = true;

    #[inline(always)]
    fn identity<B: Bitpack>() -> B {
        B::ZERO
    }

    #[inline(always)]
    fn fold<B: Bitpack>(_accumulator: B, value: B) -> B {
        value
    }
}

/// NULL: paso directo de la única entrada.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFold;

impl BitFold for NullFold {
    const CONNECTIVE: Connective = Connective::Null;
    const POST_INVERT: bool = false;

    #[inline(always)]
    fn identity<B: Bitpack>() -> B {
        B::ZERO
    }

    #[inline(always)]
    fn fold<B: Bitpack>(_accumulator: B, value: B) -> B {
        value
    }
}

/// Kernel single-shot de compuertas homogéneas de una conectiva.
#[derive(Debug)]
pub struct GateKernel<B: Bitpack, F: BitFold> {
    records: Vec<GateRecord>,
    shape: SampleShape,
    nd_range: NdRange,
    _bitpack: std::marker::PhantomData<B>,
    _fold: std::marker::PhantomData<F>,
}

impl<B: Bitpack, F: BitFold> GateKernel<B, F> {
    pub fn new(records: Vec<GateRecord>, shape: SampleShape, nd_range: NdRange) -> Self {
        Self {
            records,
            shape,
            nd_range,
            _bitpack: std::marker::PhantomData,
            _fold: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn num_gates(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[GateRecord] {
        &self.records
    }

    /// Computa un word de salida plegando los insumos en `index`.
    #[inline(always)]
    fn fold_at(record: &GateRecord, inputs: &[&[B]], index: usize) -> B {
        let mut accumulator = F::identity::<B>();

        for input in &inputs[..record.negated_inputs_offset] {
            accumulator = F::fold(accumulator, input[index]);
        }
        for input in &inputs[record.negated_inputs_offset..] {
            accumulator = F::fold(accumulator, !input[index]);
        }

        if F::POST_INVERT {
            accumulator = !accumulator;
        }
        accumulator
    }

    /// Ejecuta el lote: `earlier` contiene las olas anteriores,
    /// `writable` arranca en el primer buffer de salida del lote.
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
                    .inputs
                    .iter()
                    .map(|&slot: &BufferId| input_slice(earlier, slot, buffer_len))
                    .collect();

                gate_buffer
                    .par_chunks_mut(bitpacks_per_batch)
                    .enumerate()
                    .for_each(|(batch_id, batch_row)| {
                        let row_base = batch_id * bitpacks_per_batch;
                        for (group_z, tile) in batch_row.chunks_mut(tile_width).enumerate() {
                            for (lane, word) in tile.iter_mut().enumerate() {
                                let index = row_base + group_z * tile_width + lane;
                                *word = Self::fold_at(record, &inputs, index);
                            }
                        }
                    });
            });
    }
}
