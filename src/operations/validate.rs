use crate::error::{Result, SpecError};
use crate::math::within;
use crate::model::{BoreholeSpec, LayerSpec};

/// Checks a layer stack before extrusion.
///
/// Layers with zero slices are allowed; they add no planes.
///
/// # Errors
///
/// Returns [`SpecError::InvalidLayerSpec`] if the list is empty, a slice
/// thickness is not a positive finite number, or the stack has no slices.
pub fn validate_layers(layers: &[LayerSpec]) -> Result<()> {
    if layers.is_empty() {
        return Err(SpecError::InvalidLayerSpec("no layers defined".into()).into());
    }

    for (index, layer) in layers.iter().enumerate() {
        if !layer.thickness.is_finite() || layer.thickness <= 0.0 {
            return Err(SpecError::InvalidLayerSpec(format!(
                "layer {index} has non-positive thickness {}",
                layer.thickness
            ))
            .into());
        }
    }

    if layers.iter().all(|l| l.element_count == 0) {
        return Err(SpecError::InvalidLayerSpec("layer stack has no slices".into()).into());
    }

    Ok(())
}

/// Checks borehole records before line synthesis.
///
/// With a positive `tolerance`, two boreholes whose match windows overlap
/// are rejected, since a node could then be claimed by both.
///
/// # Errors
///
/// Returns [`SpecError::InvalidBoreholeSpec`] if the list is empty, a
/// coordinate is not finite, the top does not lie above the bottom, the
/// radius is not positive, or two boreholes are closer than the tolerance allows.
pub fn validate_boreholes(boreholes: &[BoreholeSpec], tolerance: f64) -> Result<()> {
    if boreholes.is_empty() {
        return Err(SpecError::InvalidBoreholeSpec("no boreholes defined".into()).into());
    }

    for b in boreholes {
        if ![b.x, b.y, b.z_top, b.z_bottom].iter().all(|v| v.is_finite()) {
            return Err(SpecError::InvalidBoreholeSpec(format!(
                "borehole {} has non-finite coordinates",
                b.id
            ))
            .into());
        }
        if b.z_top <= b.z_bottom {
            return Err(SpecError::InvalidBoreholeSpec(format!(
                "borehole {}: top {} is not above bottom {}",
                b.id, b.z_top, b.z_bottom
            ))
            .into());
        }
        if !b.radius.is_finite() || b.radius <= 0.0 {
            return Err(SpecError::InvalidBoreholeSpec(format!(
                "borehole {} has non-positive radius {}",
                b.id, b.radius
            ))
            .into());
        }
    }

    if tolerance > 0.0 {
        for (i, a) in boreholes.iter().enumerate() {
            for b in &boreholes[i + 1..] {
                if within(a.x, b.x, 2.0 * tolerance) && within(a.y, b.y, 2.0 * tolerance) {
                    return Err(SpecError::InvalidBoreholeSpec(format!(
                        "boreholes {} and {} are within twice the coincidence tolerance {tolerance}",
                        a.id, b.id
                    ))
                    .into());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BheMeshError;

    fn is_layer_error(r: Result<()>) -> bool {
        matches!(r, Err(BheMeshError::Spec(SpecError::InvalidLayerSpec(_))))
    }

    fn is_borehole_error(r: Result<()>) -> bool {
        matches!(r, Err(BheMeshError::Spec(SpecError::InvalidBoreholeSpec(_))))
    }

    #[test]
    fn empty_layer_list_is_rejected() {
        assert!(is_layer_error(validate_layers(&[])));
    }

    #[test]
    fn non_positive_thickness_is_rejected() {
        assert!(is_layer_error(validate_layers(&[LayerSpec::new(1, 2, 0.0)])));
        assert!(is_layer_error(validate_layers(&[LayerSpec::new(1, 2, -1.0)])));
        assert!(is_layer_error(validate_layers(&[LayerSpec::new(1, 2, f64::NAN)])));
    }

    #[test]
    fn stack_without_slices_is_rejected() {
        assert!(is_layer_error(validate_layers(&[LayerSpec::new(1, 0, 1.0)])));
    }

    #[test]
    fn zero_slice_layer_among_others_is_accepted() {
        let layers = [LayerSpec::new(1, 0, 1.0), LayerSpec::new(2, 3, 1.0)];
        assert!(validate_layers(&layers).is_ok());
    }

    #[test]
    fn inverted_borehole_is_rejected() {
        let b = BoreholeSpec::new(1, 0.0, 0.0, -10.0, 0.0, 0.1);
        assert!(is_borehole_error(validate_boreholes(&[b], 0.0)));
    }

    #[test]
    fn zero_radius_is_rejected() {
        let b = BoreholeSpec::new(1, 0.0, 0.0, 0.0, -10.0, 0.0);
        assert!(is_borehole_error(validate_boreholes(&[b], 0.0)));
    }

    #[test]
    fn empty_borehole_list_is_rejected() {
        assert!(is_borehole_error(validate_boreholes(&[], 0.0)));
    }

    #[test]
    fn overlapping_match_windows_are_rejected() {
        let a = BoreholeSpec::new(1, 0.0, 0.0, 0.0, -10.0, 0.1);
        let b = BoreholeSpec::new(2, 0.01, 0.0, 0.0, -10.0, 0.1);
        assert!(validate_boreholes(&[a, b], 0.0).is_ok());
        assert!(is_borehole_error(validate_boreholes(&[a, b], 0.01)));
        assert!(validate_boreholes(&[a, b], 0.001).is_ok());
    }
}
