// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A macro to define bitflags in a structured way.

#[macro_export]
#[doc(hidden)]
macro_rules! ember_bitflags {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident: $ty:ty {
            $(
                $(#[$flag_attr:meta])*
                const $flag_name:ident = $flag_value:expr;
            )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name {
            pub(crate) bits: $ty,
        }

        impl $name {
            /// An empty set of flags.
            pub const EMPTY: Self = Self { bits: 0 };

            /// Creates a new bitflag set from the given raw bits.
            pub const fn from_bits(bits: $ty) -> Self {
                Self { bits }
            }

            /// Returns the raw value of the bitflag set.
            pub const fn bits(&self) -> $ty {
                self.bits
            }

            /// Returns `true` if all flags in `other` are contained within `self`.
            pub const fn contains(&self, other: Self) -> bool {
                (self.bits & other.bits) == other.bits
            }

            /// Returns `true` if any flag in `other` is contained within `self`.
            pub const fn intersects(&self, other: Self) -> bool {
                (self.bits & other.bits) != 0
            }

            /// Inserts the flags in `other` into `self`.
            pub fn insert(&mut self, other: Self) {
                self.bits |= other.bits;
            }

            /// Removes the flags in `other` from `self`.
            pub fn remove(&mut self, other: Self) {
                self.bits &= !other.bits;
            }

            /// Returns a new `Self` with `other` flags inserted.
            #[must_use]
            pub const fn with(mut self, other: Self) -> Self {
                self.bits |= other.bits;
                self
            }

            /// Returns a new `Self` with `other` flags removed.
            #[must_use]
            pub const fn without(mut self, other: Self) -> Self {
                self.bits &= !other.bits;
                self
            }

            // Define the individual flag constants
            $(
                $(#[$flag_attr])*
                pub const $flag_name: Self = Self { bits: $flag_value };
            )*
        }

        impl core::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, other: Self) -> Self {
                Self { bits: self.bits | other.bits }
            }
        }

        impl core::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, other: Self) -> Self {
                Self { bits: self.bits & other.bits }
            }
        }

        impl core::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, other: Self) {
                self.bits |= other.bits;
            }
        }

        // Debug prints the names of the set flags rather than the raw value.
        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let mut remaining = self.bits;
                let mut first = true;

                write!(f, "{}(", stringify!($name))?;
                $(
                    if ($flag_value != 0) && (remaining & $flag_value) == $flag_value {
                        if !first {
                            write!(f, " | ")?;
                        }
                        write!(f, "{}", stringify!($flag_name))?;
                        remaining &= !$flag_value;
                        first = false;
                    }
                )*
                if remaining != 0 {
                    if !first {
                        write!(f, " | ")?;
                    }
                    write!(f, "UNKNOWN({:#x})", remaining)?;
                    first = false;
                }
                if first {
                    write!(f, "EMPTY")?;
                }
                write!(f, ")")
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::ember_bitflags;

    ember_bitflags! {
        /// Flags used to exercise the macro.
        pub struct ProbeFlags: u32 {
            const ALPHA = 1 << 0;
            const BETA = 1 << 1;
            const GAMMA = 1 << 2;
            const ALPHA_GAMMA = Self::ALPHA.bits() | Self::GAMMA.bits();
        }
    }

    #[test]
    fn empty_flags() {
        let flags = ProbeFlags::EMPTY;
        assert_eq!(flags.bits(), 0);
        assert!(flags.contains(ProbeFlags::EMPTY));
        assert!(!flags.contains(ProbeFlags::ALPHA));
        assert_eq!(format!("{flags:?}"), "ProbeFlags(EMPTY)");
    }

    #[test]
    fn combine_and_query() {
        let flags = ProbeFlags::ALPHA | ProbeFlags::GAMMA;
        assert_eq!(flags, ProbeFlags::ALPHA_GAMMA);
        assert!(flags.contains(ProbeFlags::ALPHA));
        assert!(!flags.contains(ProbeFlags::BETA));
        assert!(flags.intersects(ProbeFlags::GAMMA | ProbeFlags::BETA));
        assert_eq!(format!("{flags:?}"), "ProbeFlags(ALPHA | GAMMA)");
    }

    #[test]
    fn insert_and_remove() {
        let mut flags = ProbeFlags::ALPHA;
        flags.insert(ProbeFlags::BETA);
        assert!(flags.contains(ProbeFlags::ALPHA | ProbeFlags::BETA));
        flags.remove(ProbeFlags::ALPHA);
        assert_eq!(flags, ProbeFlags::BETA);
    }

    #[test]
    fn with_and_without_leave_original_untouched() {
        let base = ProbeFlags::ALPHA;
        let extended = base.with(ProbeFlags::GAMMA);
        assert_eq!(extended, ProbeFlags::ALPHA_GAMMA);
        assert_eq!(base, ProbeFlags::ALPHA);
        assert_eq!(extended.without(ProbeFlags::ALPHA), ProbeFlags::GAMMA);
    }

    #[test]
    fn debug_reports_unknown_bits() {
        let flags = ProbeFlags::from_bits(1 << 10);
        assert_eq!(format!("{flags:?}"), "ProbeFlags(UNKNOWN(0x400))");
    }
}
