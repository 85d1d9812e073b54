/// (timezone, label, label_en, country, country_en, aliases)
pub(crate) type CatalogRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [&'static str],
);

// Order matters: both matching passes return the first hit.
pub(crate) const BUILTIN_LOCATIONS: &[CatalogRow] = &[
    // México
    ("America/Mexico_City", "Ciudad de México", "Mexico City", "México", "Mexico", &["cdmx", "df", "mexico city", "ciudad de mexico", "mexico df", "distrito federal"]),
    ("America/Mexico_City", "Guadalajara", "Guadalajara", "México", "Mexico", &["guadalajara", "gdl", "jalisco"]),
    ("America/Monterrey", "Monterrey", "Monterrey", "México", "Mexico", &["monterrey", "mty", "nuevo leon"]),
    ("America/Mexico_City", "Puebla", "Puebla", "México", "Mexico", &["puebla"]),
    ("America/Tijuana", "Tijuana", "Tijuana", "México", "Mexico", &["tijuana", "tj", "baja california"]),
    ("America/Mexico_City", "León", "León", "México", "Mexico", &["leon", "guanajuato"]),
    ("America/Mexico_City", "Zacatecas", "Zacatecas", "México", "Mexico", &["zacatecas"]),
    ("America/Mexico_City", "Ciudad Victoria", "Ciudad Victoria", "México", "Mexico", &["ciudad victoria", "victoria", "tamaulipas"]),
    ("America/Mexico_City", "Querétaro", "Querétaro", "México", "Mexico", &["queretaro", "qro"]),
    ("America/Mexico_City", "Mérida", "Mérida", "México", "Mexico", &["merida", "yucatan"]),
    ("America/Cancun", "Cancún", "Cancún", "México", "Mexico", &["cancun", "quintana roo", "playa del carmen"]),
    ("America/Mexico_City", "Morelia", "Morelia", "México", "Mexico", &["morelia", "michoacan"]),
    ("America/Mexico_City", "Oaxaca", "Oaxaca", "México", "Mexico", &["oaxaca"]),
    ("America/Mexico_City", "Veracruz", "Veracruz", "México", "Mexico", &["veracruz"]),
    ("America/Hermosillo", "Hermosillo", "Hermosillo", "México", "Mexico", &["hermosillo", "sonora"]),
    ("America/Chihuahua", "Chihuahua", "Chihuahua", "México", "Mexico", &["chihuahua"]),
    ("America/Mazatlan", "Mazatlán", "Mazatlán", "México", "Mexico", &["mazatlan", "sinaloa", "culiacan"]),
    // Sudamérica
    ("America/Lima", "Lima", "Lima", "Perú", "Peru", &["lima", "peru", "perú"]),
    ("America/Bogota", "Bogotá", "Bogotá", "Colombia", "Colombia", &["bogota", "colombia", "medellin", "cali"]),
    ("America/Santiago", "Santiago", "Santiago", "Chile", "Chile", &["santiago", "chile"]),
    ("America/Argentina/Buenos_Aires", "Buenos Aires", "Buenos Aires", "Argentina", "Argentina", &["buenos aires", "argentina", "bsas"]),
    ("America/Sao_Paulo", "São Paulo", "São Paulo", "Brasil", "Brazil", &["sao paulo", "brasil", "brazil", "rio de janeiro", "rio"]),
    ("America/Caracas", "Caracas", "Caracas", "Venezuela", "Venezuela", &["caracas", "venezuela"]),
    ("America/Guayaquil", "Ecuador", "Ecuador", "Ecuador", "Ecuador", &["quito", "guayaquil", "ecuador"]),
    ("America/La_Paz", "Bolivia", "Bolivia", "Bolivia", "Bolivia", &["la paz", "bolivia", "santa cruz"]),
    ("America/Asuncion", "Paraguay", "Paraguay", "Paraguay", "Paraguay", &["asuncion", "paraguay"]),
    ("America/Montevideo", "Uruguay", "Uruguay", "Uruguay", "Uruguay", &["montevideo", "uruguay"]),
    // Centroamérica y Caribe
    ("America/Guatemala", "Guatemala", "Guatemala", "Guatemala", "Guatemala", &["guatemala"]),
    ("America/Costa_Rica", "Costa Rica", "Costa Rica", "Costa Rica", "Costa Rica", &["costa rica", "san jose"]),
    ("America/Panama", "Panamá", "Panama", "Panamá", "Panama", &["panama"]),
    ("America/Havana", "Cuba", "Cuba", "Cuba", "Cuba", &["habana", "cuba", "la habana"]),
    ("America/Santo_Domingo", "Rep. Dominicana", "Dominican Rep.", "Rep. Dominicana", "Dominican Rep.", &["santo domingo", "dominicana", "republica dominicana"]),
    ("America/Puerto_Rico", "Puerto Rico", "Puerto Rico", "Puerto Rico", "Puerto Rico", &["puerto rico", "san juan"]),
    ("America/El_Salvador", "El Salvador", "El Salvador", "El Salvador", "El Salvador", &["el salvador", "salvador"]),
    ("America/Tegucigalpa", "Honduras", "Honduras", "Honduras", "Honduras", &["honduras", "tegucigalpa"]),
    ("America/Managua", "Nicaragua", "Nicaragua", "Nicaragua", "Nicaragua", &["nicaragua", "managua"]),
    // Estados Unidos
    ("America/Los_Angeles", "Los Ángeles", "Los Angeles", "USA", "USA", &["los angeles", "la", "california", "san francisco", "san diego"]),
    ("America/Chicago", "Chicago", "Chicago", "USA", "USA", &["chicago", "houston", "dallas", "texas", "austin"]),
    ("America/New_York", "Nueva York", "New York", "USA", "USA", &["new york", "nueva york", "nyc", "miami", "florida", "boston", "washington"]),
    ("America/Denver", "Denver", "Denver", "USA", "USA", &["denver", "colorado", "phoenix", "arizona"]),
    // Europa
    ("Europe/Madrid", "España", "Spain", "España", "Spain", &["madrid", "españa", "spain", "barcelona", "valencia", "sevilla"]),
    ("Europe/London", "Reino Unido", "United Kingdom", "UK", "UK", &["london", "londres", "uk", "reino unido", "england", "manchester"]),
    ("Europe/Paris", "Francia", "France", "Francia", "France", &["paris", "francia", "france"]),
    ("Europe/Berlin", "Alemania", "Germany", "Alemania", "Germany", &["berlin", "alemania", "germany", "munich"]),
    ("Europe/Rome", "Italia", "Italy", "Italia", "Italy", &["roma", "italia", "italy", "milan"]),
    ("Europe/Amsterdam", "Países Bajos", "Netherlands", "Países Bajos", "Netherlands", &["amsterdam", "holanda", "netherlands", "paises bajos"]),
    ("Europe/Lisbon", "Portugal", "Portugal", "Portugal", "Portugal", &["lisboa", "portugal", "lisbon"]),
    // Asia
    ("Asia/Kolkata", "India (Vṛndāvan)", "India (Vṛndāvan)", "India", "India", &["india", "vrindavan", "vrindavana", "mathura", "delhi", "mumbai", "kolkata", "mayapur", "navadvipa"]),
    ("Asia/Tokyo", "Japón", "Japan", "Japón", "Japan", &["tokyo", "japon", "japan"]),
    ("Asia/Shanghai", "China", "China", "China", "China", &["china", "beijing", "shanghai"]),
    ("Asia/Singapore", "Singapur", "Singapore", "Singapur", "Singapore", &["singapore", "singapur"]),
    ("Asia/Dubai", "Emiratos Árabes", "UAE", "EAU", "UAE", &["dubai", "uae", "emiratos"]),
    // Oceanía
    ("Australia/Sydney", "Australia", "Australia", "Australia", "Australia", &["australia", "sydney", "melbourne"]),
    ("Pacific/Auckland", "Nueva Zelanda", "New Zealand", "Nueva Zelanda", "New Zealand", &["nueva zelanda", "new zealand", "auckland"]),
    // África
    ("Africa/Johannesburg", "Sudáfrica", "South Africa", "Sudáfrica", "South Africa", &["sudafrica", "south africa", "johannesburg", "cape town"]),
];

/// Single-digit replies offered on first contact, mapped to catalog labels.
pub(crate) const QUICK_CODES: &[(&str, &str)] = &[
    ("1", "Ciudad de México"),
    ("2", "Guadalajara"),
    ("3", "Monterrey"),
    ("4", "India (Vṛndāvan)"),
];
