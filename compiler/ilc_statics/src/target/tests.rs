use pretty_assertions::assert_eq;

use super::*;

#[test]
fn defaults_to_eight_byte_primitives() {
    let target = TargetDetails::new(8, LayoutOptions::default()).unwrap();
    assert_eq!(target.pointer_size(), 8);
    assert_eq!(target.maximum_primitive_size(), 8);
}

#[test]
fn headers_scale_with_pointer_size() {
    let x64 = TargetDetails::new(8, LayoutOptions::default()).unwrap();
    assert_eq!(x64.non_gc_statics_start(0), 48);
    assert_eq!(x64.thread_non_gc_statics_start(0), 24);

    let x86 = TargetDetails::new(4, LayoutOptions::default()).unwrap();
    assert_eq!(x86.non_gc_statics_start(0), 24);
    assert_eq!(x86.thread_non_gc_statics_start(0), 12);
}

#[test]
fn headers_reserve_one_byte_per_type() {
    let target = TargetDetails::new(8, LayoutOptions::default()).unwrap();
    assert_eq!(target.non_gc_statics_start(5), 53);
    assert_eq!(target.thread_non_gc_statics_start(5), 29);
}

#[test]
fn rejects_odd_pointer_sizes() {
    for pointer_size in [0, 2, 6, 16] {
        assert_eq!(
            TargetDetails::new(pointer_size, LayoutOptions::default()),
            Err(StaticLayoutError::UnsupportedTarget {
                pointer_size,
                maximum_primitive_size: 8,
            })
        );
    }
}

#[test]
fn rejects_bad_maximum_primitive_size() {
    let not_power_of_two = LayoutOptions {
        maximum_primitive_size: 12,
    };
    assert!(TargetDetails::new(8, not_power_of_two).is_err());

    let below_pointer = LayoutOptions {
        maximum_primitive_size: 4,
    };
    assert!(TargetDetails::new(8, below_pointer).is_err());
    assert!(TargetDetails::new(4, below_pointer).is_ok());
}
