// [libs/core/device/src/working_set.rs]
/*!
 * =================================================================
 * APARATO: WORKING-SET PLANNER (V12.1 - SWISS WATCH SEAL)
 * CLASIFICACIÓN: CORE DEVICE (ESTRATO L1)
 * RESPONSABILIDAD: NEGOCIACIÓN DE FORMAS LOCALES, ND-RANGES Y BUFFERS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BIT BUDGET: log2(max_work_group_size) se gasta con avaricia sobre
 *    los ejes (eventos, batch, bitpacks), cada uno acotado por su
 *    límite de hardware y por la potencia de dos más cercana a su
 *    tamaño natural.
 * 2. CPU FAST-PATH: En dispositivos clase CPU el work-item procesa
 *    exactamente un word de 64 bits sin importar W.
 * 3. CLAMP, NEVER FAIL: La negociación siempre converge por recorte;
 *    el producto local jamás excede max_work_group_size (aserción).
 * =================================================================
 */

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use arbol_core_sampling::bitpack::Bitpack;
use arbol_core_sampling::shape::SampleShape;

use crate::occupancy::desired_occupancy_for;
use crate::profile::{DeviceClass, DeviceProfile};
use crate::range::{NdRange, Range3};

/// Potencia de dos más cercana a `n`; los empates eligen la menor.
pub fn closest_power_of_2(n: usize) -> usize {
    if n == 0 {
        return 1;
    }

    let mut min_difference = usize::MAX;
    let mut closest = 0usize;

    for exponent in 0..usize::BITS {
        let Some(power) = 1usize.checked_shl(exponent) else {
            break;
        };
        let difference = power.abs_diff(n);
        if difference < min_difference {
            min_difference = difference;
            closest = power;
        } else if difference > min_difference {
            // Las diferencias crecen monótonamente tras el mínimo.
            break;
        }
    }

    closest
}

/// log2 entero por debajo, para n >= 1.
#[inline]
fn floor_log2(n: usize) -> u32 {
    usize::BITS - 1 - n.max(1).leading_zeros()
}

/// Planificador de working-set para un kernel concreto.
///
/// Es una función pura del perfil del dispositivo y del par
/// (num_events, forma de muestreo): no surte errores en runtime.
#[derive(Debug, Clone)]
pub struct WorkingSet<B: Bitpack> {
    pub num_events: usize,
    pub shape: SampleShape,
    pub samples_per_event_in_bytes: u64,
    pub samples_per_event_in_bits: u64,
    pub samples_in_bytes: u64,
    pub desired_occupancy: usize,
    profile: DeviceProfile,
    _bitpack: PhantomData<B>,
}

impl<B: Bitpack> WorkingSet<B> {
    pub fn new(profile: &DeviceProfile, num_events: usize, shape: SampleShape) -> Self {
        let samples_per_event_in_bytes = shape.bytes_per_event::<B>();
        Self {
            num_events,
            shape,
            samples_per_event_in_bytes,
            samples_per_event_in_bits: samples_per_event_in_bytes * 8,
            samples_in_bytes: samples_per_event_in_bytes * num_events as u64,
            desired_occupancy: desired_occupancy_for(profile.backend, profile.max_compute_units),
            profile: profile.clone(),
            _bitpack: PhantomData,
        }
    }

    /// Alineación del eje de bitpacks: un work-item CPU cubre 8 bytes.
    #[inline]
    fn cpu_word_tile() -> usize {
        (8 / (B::BITS as usize / 8)).max(1)
    }

    /// Redondea la forma solicitada para honrar la alineación del
    /// dispositivo: el eje de bitpacks sube al múltiplo del tile CPU.
    pub fn rounded(shape: SampleShape) -> SampleShape {
        let tile = Self::cpu_word_tile();
        SampleShape {
            batch_size: shape.batch_size.max(1),
            bitpacks_per_batch: shape.bitpacks_per_batch.max(1).div_ceil(tile) * tile,
        }
    }

    /// Forma local 3D para dispositivos clase CPU.
    ///
    /// Eventos y batch quedan en 1; el eje de bitpacks procesa un word
    /// de 64 bits por work-item sin importar W.
    fn local_range_for_cpu(&self, limits: &Range3) -> Range3 {
        let word_tile = Self::cpu_word_tile();
        let bounded = if limits.bitpacks == 0 {
            word_tile
        } else {
            word_tile.clamp(1, limits.bitpacks)
        };
        let hardware_limited = bounded.min(self.profile.max_work_item_sizes.bitpacks);
        Range3::new(1, 1, hardware_limited.max(1))
    }

    /// Forma local 3D para dispositivos acelerados: presupuesto de bits.
    fn local_range_for_gpu(&self, limits: &Range3) -> Range3 {
        let mut remaining_budget = floor_log2(self.profile.max_work_group_size);

        let mut spend_axis = |natural: usize, limit: usize, hardware_limit: usize| -> usize {
            let target = if limit == 0 { natural } else { natural.clamp(1, limit) };
            let hardware_limited = target.min(hardware_limit).max(1);
            let rounded_log2 = floor_log2(closest_power_of_2(hardware_limited));
            let spent = rounded_log2.min(remaining_budget);
            remaining_budget -= spent;
            1usize << spent
        };

        let local_events = spend_axis(self.num_events, limits.events, self.profile.max_work_item_sizes.events);
        let local_batch = spend_axis(
            self.shape.batch_size,
            limits.batch,
            self.profile.max_work_item_sizes.batch,
        );
        let local_bitpacks = spend_axis(
            self.shape.bitpacks_per_batch,
            limits.bitpacks,
            self.profile.max_work_item_sizes.bitpacks,
        );

        Range3::new(local_events, local_batch, local_bitpacks)
    }

    /// Forma local 3D negociada para este kernel.
    pub fn local_range(&self, limits: Range3) -> Range3 {
        let local = match self.profile.class {
            DeviceClass::Cpu => self.local_range_for_cpu(&limits),
            DeviceClass::Gpu | DeviceClass::Accelerator | DeviceClass::Host => {
                self.local_range_for_gpu(&limits)
            }
        };

        debug!(
            "📐 [WORKING_SET]: local_range (events:{}, batch:{}, bitpacks:{}) -> ({}, {}, {})",
            self.num_events,
            self.shape.batch_size,
            self.shape.bitpacks_per_batch,
            local.events,
            local.batch,
            local.bitpacks
        );
        assert!(
            local.product() <= self.profile.max_work_group_size,
            "local range exceeds max_work_group_size"
        );
        local
    }

    /// Forma local para el kernel de tally: un solo work-group por
    /// tally en el eje de eventos, condición que habilita la
    /// finalización de estadísticas por el líder de grupo.
    pub fn local_range_for_tally(&self) -> Range3 {
        self.local_range(Range3::new(1, 0, 0))
    }

    /// ND-range con los tamaños globales acolchados al local.
    pub fn nd_range(&self, local: Range3) -> NdRange {
        NdRange::padded(
            Range3::new(self.num_events, self.shape.batch_size, self.shape.bitpacks_per_batch),
            local,
        )
    }

    /// Mayor forma potencia-de-dos que cabe en max_mem_alloc_size.
    ///
    /// Barrido descendente de exponentes: primero cede el eje de
    /// batch, después el de bitpacks.
    pub fn optimal_sample_shape(profile: &DeviceProfile, num_events: usize) -> SampleShape {
        const MAX_SHAPE_EXPONENT: u32 = 16;

        let word_bytes = B::BITS as u64 / 8;
        for bitpack_exponent in (0..=MAX_SHAPE_EXPONENT).rev() {
            for batch_exponent in (0..=MAX_SHAPE_EXPONENT).rev() {
                let used_bytes = num_events as u64
                    * (1u64 << batch_exponent)
                    * (1u64 << bitpack_exponent)
                    * word_bytes;
                if used_bytes <= profile.max_mem_alloc_size {
                    return SampleShape {
                        batch_size: 1usize << batch_exponent,
                        bitpacks_per_batch: 1usize << bitpack_exponent,
                    };
                }
            }
        }

        // Ningún par de exponentes cupo: forma degenerada mínima.
        SampleShape {
            batch_size: 1,
            bitpacks_per_batch: 1,
        }
    }
}

impl<B: Bitpack> fmt::Display for WorkingSet<B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "{}", self.profile)?;
        writeln!(formatter, "------------------------------------------------")?;
        writeln!(formatter, "desired_occupancy: {}", self.desired_occupancy)?;
        writeln!(formatter, "num_events: {}", self.num_events)?;
        writeln!(formatter, "buffer_shape_batch_size: {}", self.shape.batch_size)?;
        writeln!(formatter, "buffer_shape_bitpacks_per_batch: {}", self.shape.bitpacks_per_batch)?;
        writeln!(formatter, "buffer_samples_per_event_in_bytes: {}", self.samples_per_event_in_bytes)?;
        writeln!(formatter, "sample_buffer_in_bytes: {}", self.samples_in_bytes)?;
        write!(formatter, "sampled_bits_per_event: {}", self.samples_per_event_in_bits)
    }
}
