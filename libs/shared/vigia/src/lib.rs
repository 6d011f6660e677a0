// [libs/shared/vigia/src/lib.rs]
/*!
 * =================================================================
 * APARATO: VIGÍA OBSERVER (V4.0 - GOLD MASTER)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: BOOTSTRAP DE TRAZADO Y ESCUDO DE PÁNICOS DEL
 *                  DISPOSITIVO DE CÓMPUTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. KERNEL AWARENESS: Los hilos de la cola de dispositivo llevan el
 *    prefijo "arbol-device-"; el escudo de pánicos clasifica cada
 *    colapso como falla de kernel o falla del anfitrión y lo emite
 *    con esa etiqueta de estrato.
 * 2. HOOK CHAINING: El hook previo se preserva y se invoca después
 *    del volcado estructurado.
 * 3. DUAL MODE: Salida compacta durante el desarrollo, JSON plano en
 *    despliegues de producción.
 * =================================================================
 */

use std::panic;
use std::thread;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Prefijo de los hilos del pool del dispositivo de cómputo.
const DEVICE_THREAD_PREFIX: &str = "arbol-device-";

/// Directivas de filtrado por defecto del evaluador: el dominio de
/// simulación siempre habla; rayon solo ante advertencias.
fn default_filter_directives(service_label: &str) -> String {
    let base_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    format!(
        "{service_label}={base_level},arbol_domain_simulation={base_level},\
         arbol_core_device={base_level},rayon=warn"
    )
}

/// Levanta el estrato de observabilidad del evaluador.
///
/// # Comportamiento:
/// - Desarrollo: salida compacta sin target.
/// - Producción: tramas JSON planas.
///
/// # Errors:
/// Provoca pánico si otro suscriptor global ya fue inicializado.
pub fn init_tracing(service_label: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter_directives(service_label)));

    if cfg!(debug_assertions) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .init();
    }

    install_panic_shield(service_label);

    info!(
        "👁️  [VIGIA]: observabilidad en línea para [{}]; escudo de pánicos armado",
        service_label
    );
}

/// Arma el escudo de pánicos con conciencia de hilos de kernel.
///
/// Un colapso dentro del pool del dispositivo se etiqueta como falla
/// de kernel; cualquier otro hilo se reporta como falla del anfitrión.
fn install_panic_shield(service_label: &str) {
    let service = service_label.to_string();
    let previous_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let current_thread = thread::current();
        let thread_label = current_thread.name().unwrap_or("anfitrion-sin-nombre");
        let is_kernel_collapse = thread_label.starts_with(DEVICE_THREAD_PREFIX);

        let collapse_site = panic_info
            .location()
            .map(|site| format!("{}:{}", site.file(), site.line()))
            .unwrap_or_else(|| "sitio-desconocido".to_string());

        let collapse_detail = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("colapso sin carga útil");

        if is_kernel_collapse {
            error!(
                target: "vigia_shield",
                servicio = %service,
                hilo_de_kernel = %thread_label,
                sitio = %collapse_site,
                "💥 [KERNEL_FAULT]: colapso dentro del pool del dispositivo: {}",
                collapse_detail
            );
        } else {
            error!(
                target: "vigia_shield",
                servicio = %service,
                hilo = %thread_label,
                sitio = %collapse_site,
                "💥 [HOST_FAULT]: colapso en el anfitrión: {}",
                collapse_detail
            );
        }

        previous_hook(panic_info);
    }));
}
