// ccs-core/src/units.rs

use uom::si::f64::{Mass as UomMass, MassDensity as UomMassDensity, Ratio as UomRatio, Volume as UomVolume};

// Public canonical unit types (SI, f64)
pub type Volume = UomVolume;
pub type Mass = UomMass;
pub type Density = UomMassDensity;
pub type Ratio = UomRatio;

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

#[inline]
pub fn in_m3(v: Volume) -> f64 {
    use uom::si::volume::cubic_meter;
    v.get::<cubic_meter>()
}

#[inline]
pub fn in_kg(v: Mass) -> f64 {
    use uom::si::mass::kilogram;
    v.get::<kilogram>()
}

/// Mass of a phase occupying `fraction` of `volume` at `density`.
#[inline]
pub fn phase_mass(volume: Volume, fraction: Ratio, density: Density) -> Mass {
    volume * fraction * density
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _v = m3(2.0);
        let _m = kg(3.0);
        let _rho = kg_per_m3(1000.0);
        let _r = unitless(0.5);
    }

    #[test]
    fn phase_mass_in_si() {
        let mass = phase_mass(m3(10.0), unitless(0.25), kg_per_m3(700.0));
        assert!((in_kg(mass) - 1750.0).abs() < 1e-9);
        assert!((in_m3(m3(4.5)) - 4.5).abs() < 1e-12);
    }
}
