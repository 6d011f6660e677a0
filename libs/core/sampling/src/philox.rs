// [libs/core/sampling/src/philox.rs]
/*!
 * =================================================================
 * APARATO: PHILOX 4x32-10 COUNTER ENGINE (V9.3 - OVERFLOW HARDENED)
 * CLASIFICACIÓN: CORE SAMPLING (ESTRATO L1)
 * RESPONSABILIDAD: PRNG CONTADOR DETERMINISTA SIN ESTADO POR HILO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STATELESS PURITY: Cada invocación es una función pura de
 *    (contador de 128 bits, clave de stream de 64 bits).
 * 2. STREAM KEYING: La iteración y la ronda de slice seleccionan el
 *    stream vía XOR sobre la clave inicial; mezclarlas por corrimiento
 *    del contador excedería el ancho de 32 bits cuando W=64.
 * 3. OVERFLOW HARDENED: Toda la aritmética es 'wrapping' explícita.
 *
 * # Mathematical Proof (Philox 4x32-10):
 * Cada ronda multiplica dos carriles del contador por las constantes
 * M4x32A/M4x32B en precisión de 64 bits, cruza mitades altas y bajas y
 * mezcla la clave; la clave avanza con las constantes de Weyl W32A/W32B.
 * Diez rondas producen cuatro words de 32 bits estadísticamente
 * independientes por contador.
 * =================================================================
 */

/// Constante de Weyl para el avance de la primera mitad de la clave.
pub const PHILOX_W32A: u32 = 0x9E37_79B9;
/// Constante de Weyl para el avance de la segunda mitad de la clave.
pub const PHILOX_W32B: u32 = 0xBB67_AE85;
/// Multiplicador del carril 0 del contador.
pub const PHILOX_M4X32A: u32 = 0xD251_1F53;
/// Multiplicador del carril 2 del contador.
pub const PHILOX_M4X32B: u32 = 0xCD9E_8D57;

/// Clave inicial fija del generador (idéntica entre ejecuciones).
pub const PHILOX_INITIAL_KEY: (u32, u32) = (382_307_844, 293_830_103);

/// Número de rondas de mezcla del esquema 4x32-10.
pub const PHILOX_NUM_ROUNDS: u32 = 10;

/// Contador de 128 bits del generador, en cuatro carriles de 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhiloxState {
    pub lanes: [u32; 4],
}

impl PhiloxState {
    /// Ensambla el contador canónico de un punto de muestreo.
    ///
    /// Los sumandos +1 garantizan que ningún carril del contador
    /// arranque en cero.
    #[inline(always)]
    pub fn for_sample_point(node_index: u32, event_slot: u32, batch_id: u32, bitpack_idx: u32) -> Self {
        Self {
            lanes: [
                node_index.wrapping_add(1),
                event_slot.wrapping_add(1),
                batch_id.wrapping_add(1),
                bitpack_idx.wrapping_add(1),
            ],
        }
    }
}

/// Deriva la clave de stream para una (iteración, ronda de slice).
///
/// Streams distintos para pares (iteración, ronda) distintos; la
/// selección es biyectiva sobre los 64 bits de la clave, por lo que no
/// existen colisiones entre slices de una misma palabra ni entre
/// iteraciones sucesivas.
#[inline(always)]
pub fn stream_key(iteration: u32, slice_round: u32) -> (u32, u32) {
    (
        PHILOX_INITIAL_KEY.0 ^ iteration,
        PHILOX_INITIAL_KEY.1 ^ slice_round,
    )
}

/// Una ronda de mezcla Philox: multiplicación, cruce y avance de clave.
#[inline(always)]
fn philox_round(key_half_0: &mut u32, key_half_1: &mut u32, counters: &mut PhiloxState) {
    // Multiplicación en precisión extendida de los carriles 0 y 2.
    let product_0 = (PHILOX_M4X32A as u64).wrapping_mul(counters.lanes[0] as u64);
    let product_1 = (PHILOX_M4X32B as u64).wrapping_mul(counters.lanes[2] as u64);

    // Partición en mitades altas y bajas.
    let high_0 = (product_0 >> 32) as u32;
    let low_0 = product_0 as u32;
    let high_1 = (product_1 >> 32) as u32;
    let low_1 = product_1 as u32;

    // Cruce de carriles con mezcla de clave.
    counters.lanes[0] = high_1 ^ counters.lanes[1] ^ *key_half_0;
    counters.lanes[1] = low_1;
    counters.lanes[2] = high_0 ^ counters.lanes[3] ^ *key_half_1;
    counters.lanes[3] = low_0;

    // Avance de Weyl de la clave.
    *key_half_0 = key_half_0.wrapping_add(PHILOX_W32A);
    *key_half_1 = key_half_1.wrapping_add(PHILOX_W32B);
}

/// Genera cuatro words de 32 bits a partir de un contador y su stream.
#[inline]
pub fn philox_generate(counter: &PhiloxState, key: (u32, u32)) -> PhiloxState {
    let (mut key_half_0, mut key_half_1) = key;
    let mut counters = *counter;

    for _ in 0..PHILOX_NUM_ROUNDS {
        philox_round(&mut key_half_0, &mut key_half_1, &mut counters);
    }

    counters
}
