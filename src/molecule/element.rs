//! Per-species display and bonding data.
//!
//! Covers the dummy atom (`X`, atomic number 0) through krypton. Radii that
//! are not tabulated fall back to [`DEFAULT_VDW_RADIUS`] and
//! [`DEFAULT_BOND_RADIUS`].

/// Van-der-Waals radius used when a species has no tabulated value.
pub const DEFAULT_VDW_RADIUS: f32 = 2.0;

/// Bond radius used when a species has no tabulated value.
pub const DEFAULT_BOND_RADIUS: f32 = 1.0;

/// Display color for species outside the table.
const FALLBACK_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

struct ElementData {
    symbol: &'static str,
    color: [f32; 3],
    /// Negative when not tabulated.
    vdw_radius: f32,
    bond_radius: f32,
}

const fn data(
    symbol: &'static str,
    color: [f32; 3],
    vdw_radius: f32,
    bond_radius: f32,
) -> ElementData {
    ElementData {
        symbol,
        color,
        vdw_radius,
        bond_radius,
    }
}

#[rustfmt::skip]
const ELEMENTS: [ElementData; 37] = [
    data("X",  [0.0, 0.0, 0.0],                       0.0,  0.0),
    data("H",  [0.9, 0.9, 0.9],                       1.2,  0.53),
    data("He", [0.850_980_4, 1.0, 1.0],               1.4,  0.31),
    data("Li", [0.8, 0.501_960_8, 1.0],               1.82, 1.67),
    data("Be", [0.760_784_3, 1.0, 0.0],               -1.0, 1.12),
    data("B",  [1.0, 0.709_803_9, 0.709_803_9],       -1.0, 0.87),
    data("C",  [0.1, 0.1, 0.1],                       1.7,  0.67),
    data("N",  [0.2, 0.2, 1.0],                       1.55, 0.56),
    data("O",  [1.0, 0.3, 0.3],                       1.52, 0.48),
    data("F",  [0.701_960_8, 1.0, 1.0],               1.47, 0.42),
    data("Ne", [0.701_960_8, 0.890_196_1, 0.960_784_3], 1.54, 0.38),
    data("Na", [0.670_588_2, 0.360_784_3, 0.949_019_6], 2.27, 1.9),
    data("Mg", [0.541_176_5, 1.0, 0.0],               1.73, 1.45),
    data("Al", [0.749_019_6, 0.650_980_4, 0.650_980_4], -1.0, 1.18),
    data("Si", [0.941_176_5, 0.784_313_7, 0.627_451], 2.1,  1.11),
    data("P",  [1.0, 0.501_960_8, 0.0],               1.8,  0.98),
    data("S",  [0.9, 0.775, 0.25],                    1.8,  0.88),
    data("Cl", [0.121_568_6, 0.941_176_5, 0.121_568_6], 1.75, 0.79),
    data("Ar", [0.501_960_8, 0.819_607_8, 0.890_196_1], 1.88, 0.71),
    data("K",  [0.560_784_3, 0.250_980_4, 0.831_372_5], 2.75, 2.43),
    data("Ca", [0.239_215_7, 1.0, 0.0],               -1.0, 1.94),
    data("Sc", [0.901_960_8, 0.901_960_8, 0.901_960_8], -1.0, 1.84),
    data("Ti", [0.749_019_6, 0.760_784_3, 0.780_392_2], -1.0, 1.76),
    data("V",  [0.650_980_4, 0.650_980_4, 0.670_588_2], -1.0, 1.71),
    data("Cr", [0.541_176_5, 0.6, 0.780_392_2],       -1.0, 1.66),
    data("Mn", [0.611_764_7, 0.478_431_4, 0.780_392_2], -1.0, 1.61),
    data("Fe", [0.878_431_4, 0.4, 0.2],               -1.0, 1.56),
    data("Co", [0.941_176_5, 0.564_705_9, 0.627_451], -1.0, 1.52),
    data("Ni", [0.313_725_5, 0.815_686_3, 0.313_725_5], 1.63, 1.49),
    data("Cu", [0.784_313_7, 0.501_960_8, 0.2],       1.4,  1.45),
    data("Zn", [0.490_196_1, 0.501_960_8, 0.690_196_1], 1.39, 1.42),
    data("Ga", [0.760_784_3, 0.560_784_3, 0.560_784_3], 1.87, 1.36),
    data("Ge", [0.4, 0.560_784_3, 0.560_784_3],       -1.0, 1.25),
    data("As", [0.741_176_5, 0.501_960_8, 0.890_196_1], 1.85, 1.14),
    data("Se", [1.0, 0.631_372_5, 0.0],               1.9,  1.03),
    data("Br", [0.650_980_4, 0.160_784_3, 0.160_784_3], 1.85, 0.94),
    data("Kr", [0.360_784_3, 0.721_568_6, 0.819_607_8], 2.02, 0.88),
];

/// A chemical species, identified by atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element(pub u32);

impl Element {
    /// Dummy atom placeholder (atomic number 0).
    pub const DUMMY: Self = Self(0);
    /// Hydrogen.
    pub const H: Self = Self(1);
    /// Carbon.
    pub const C: Self = Self(6);
    /// Nitrogen.
    pub const N: Self = Self(7);
    /// Oxygen.
    pub const O: Self = Self(8);

    fn data(self) -> Option<&'static ElementData> {
        ELEMENTS.get(self.0 as usize)
    }

    /// Resolve an element symbol such as `"C"` or `"Cl"` (case-sensitive).
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        ELEMENTS
            .iter()
            .position(|e| e.symbol == symbol)
            .map(|z| Self(z as u32))
    }

    /// Atomic number.
    #[must_use]
    pub fn atomic_number(self) -> u32 {
        self.0
    }

    /// Element symbol, or `None` outside the table.
    #[must_use]
    pub fn symbol(self) -> Option<&'static str> {
        self.data().map(|d| d.symbol)
    }

    /// RGB display color.
    #[must_use]
    pub fn cpk_color(self) -> [f32; 3] {
        self.data().map_or(FALLBACK_COLOR, |d| d.color)
    }

    /// Van-der-Waals radius in angstroms, used for sphere size.
    #[must_use]
    pub fn vdw_radius(self) -> f32 {
        match self.data() {
            Some(d) if d.vdw_radius > 0.0 => d.vdw_radius,
            _ => DEFAULT_VDW_RADIUS,
        }
    }

    /// Bond radius in angstroms, used for the bond cutoff.
    #[must_use]
    pub fn bond_radius(self) -> f32 {
        match self.data() {
            Some(d) if d.bond_radius > 0.0 => d.bond_radius,
            _ => DEFAULT_BOND_RADIUS,
        }
    }
}
