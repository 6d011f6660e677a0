// [libs/domain/simulation/src/buffers.rs]
/*!
 * =================================================================
 * APARATO: DEVICE BUFFER ARENA (V6.1 - SWISS WATCH SEAL)
 * CLASIFICACIÓN: DOMAIN MEMORY (ESTRATO L2)
 * RESPONSABILIDAD: PROPIEDAD EXCLUSIVA DE LOS BUFFERS DE MUESTRAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CONTIGUOUS SOVEREIGNTY: Todos los buffers del pipeline viven en
 *    una única reserva contigua; los registros capturan slots (índices
 *    estables), nunca punteros.
 * 2. WAVE-ORDERED ALLOCATION: Los slots se reservan en orden de ola,
 *    de modo que todo insumo de una unidad tiene slot estrictamente
 *    menor que sus salidas. El split (anteriores, salidas) expresa la
 *    invariante de dependencia como un préstamo disjunto verificado
 *    por el compilador.
 * 3. LIFECYCLE: La arena nace con el pipeline y muere con él; los
 *    buffers se sobreescriben in-place en cada iteración.
 * =================================================================
 */

use arbol_core_sampling::bitpack::Bitpack;

/// Referencia no-propietaria a un buffer de la arena, por slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BufferId(pub usize);

/// Arena propietaria de todos los buffers de muestras del pipeline.
#[derive(Debug)]
pub struct BufferArena<B: Bitpack> {
    storage: Vec<B>,
    buffer_len: usize,
    num_buffers: usize,
}

impl<B: Bitpack> BufferArena<B> {
    /// Crea la arena vacía para buffers de `buffer_len` bit-packs.
    pub fn new(buffer_len: usize) -> Self {
        assert!(buffer_len > 0, "buffer_len must be positive");
        Self {
            storage: Vec::new(),
            buffer_len,
            num_buffers: 0,
        }
    }

    /// Longitud de cada buffer, en bit-packs.
    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    /// Número de buffers reservados.
    #[inline]
    pub fn num_buffers(&self) -> usize {
        self.num_buffers
    }

    /// Reserva `count` buffers contiguos y retorna el primer slot.
    pub fn allocate_contiguous(&mut self, count: usize) -> BufferId {
        let first_slot = self.num_buffers;
        self.num_buffers += count;
        self.storage.resize(self.num_buffers * self.buffer_len, B::ZERO);
        BufferId(first_slot)
    }

    /// Vista completa de solo lectura (ruta del reductor de tallies).
    #[inline]
    pub fn all(&self) -> &[B] {
        &self.storage
    }

    /// Particiona la arena en (olas anteriores, región de escritura).
    ///
    /// La región de escritura arranca en `first_slot`; toda entrada de
    /// la unidad que escribe debe vivir en un slot anterior.
    #[inline]
    pub fn split_for_write(&mut self, first_slot: BufferId) -> (&[B], &mut [B]) {
        let boundary = first_slot.0 * self.buffer_len;
        let (earlier, writable) = self.storage.split_at_mut(boundary);
        (earlier, writable)
    }

    /// Slice de solo lectura del buffer `slot`.
    #[inline]
    pub fn buffer(&self, slot: BufferId) -> &[B] {
        let start = slot.0 * self.buffer_len;
        &self.storage[start..start + self.buffer_len]
    }
}

/// Resuelve el slice del slot `slot` dentro de la región de olas
/// anteriores entregada por [`BufferArena::split_for_write`].
#[inline]
pub fn input_slice<B: Bitpack>(earlier: &[B], slot: BufferId, buffer_len: usize) -> &[B] {
    let start = slot.0 * buffer_len;
    debug_assert!(
        start + buffer_len <= earlier.len(),
        "input slot must belong to a strictly earlier wave"
    );
    &earlier[start..start + buffer_len]
}
