//! Fixed expense and maintenance categories, and the pre-flight checks the
//! expense and maintenance forms run before anything reaches a store.

/// Expense categories with their subtypes, in display order
pub const EXPENSE_CATEGORIES: &[(&str, &[&str])] = &[
    ("Combustible", &["Bencina 93", "Bencina 95", "Bencina 97", "Diesel", "Carga eléctrica"]),
    ("Peajes", &["TAG", "Peaje manual"]),
    ("Estacionamiento", &["Parking", "Parquímetro"]),
    ("Lavado", &["Lavado simple", "Lavado full", "Aspirado"]),
    ("Seguro", &["SOAP", "Seguro anual", "Seguro mensual"]),
    ("Permisos", &["Permiso circulación", "Revisión técnica", "Multa/Parte"]),
    ("Otros", &["Accesorios", "Repuestos", "Servicio"]),
];

/// Maintenance categories with their services, in display order
pub const MAINTENANCE_CATEGORIES: &[(&str, &[&str])] = &[
    ("Motor", &["Cambio de aceite", "Cambio de bujías", "Cambio de filtro de aire"]),
    ("Suspensión", &["Cambio de amortiguadores", "Alineación y balanceo"]),
    ("Frenos", &["Cambio de pastillas", "Cambio de líquido de frenos"]),
    ("Transmisión", &["Cambio de aceite de caja", "Revisión de embrague"]),
];

pub const MISSING_VEHICLE: &str = "Selecciona un vehículo";
pub const MISSING_CATEGORY: &str = "Selecciona categoría y tipo";
pub const INVALID_AMOUNT: &str = "Ingresa un monto válido";

fn subtypes_of(catalog: &'static [(&'static str, &'static [&'static str])], category: &str) -> Option<&'static [&'static str]> {
    catalog
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, subtypes)| *subtypes)
}

pub fn expense_subtypes(category: &str) -> Option<&'static [&'static str]> {
    subtypes_of(EXPENSE_CATEGORIES, category)
}

pub fn maintenance_services(category: &str) -> Option<&'static [&'static str]> {
    subtypes_of(MAINTENANCE_CATEGORIES, category)
}

/// Label stored on a maintenance record
pub fn maintenance_type_label(category: &str, service: &str) -> String {
    format!("{} - {}", category, service)
}

/// Check the expense form and return the parsed amount, or the message for the
/// first failing rule
pub fn validate_expense_input(
    vehicle_selected: bool,
    category: &str,
    subtype: &str,
    amount_input: &str,
) -> Result<i64, &'static str> {
    if !vehicle_selected {
        return Err(MISSING_VEHICLE);
    }
    if category.trim().is_empty() || subtype.trim().is_empty() {
        return Err(MISSING_CATEGORY);
    }

    match amount_input.trim().parse::<i64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(INVALID_AMOUNT),
    }
}

/// Check the maintenance form and return the type label to store
pub fn validate_maintenance_input(
    vehicle_selected: bool,
    category: &str,
    service: &str,
) -> Result<String, &'static str> {
    if !vehicle_selected {
        return Err(MISSING_VEHICLE);
    }
    if category.trim().is_empty() || service.trim().is_empty() {
        return Err(MISSING_CATEGORY);
    }
    Ok(maintenance_type_label(category, service))
}
