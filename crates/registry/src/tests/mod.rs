//! Registration fixtures shared by the in-crate tests.

mod consistency;

pub(crate) trait Codec {
	fn name(&self) -> String;
}

pub(crate) struct Identity;

impl Codec for Identity {
	fn name(&self) -> String {
		"identity".into()
	}
}

pub(crate) struct Rot(pub u8);

impl Codec for Rot {
	fn name(&self) -> String {
		format!("rot{}", self.0)
	}
}

crate::register!(dyn Codec, "identity", Identity, || Identity);
crate::register!(dyn Codec, "rot13", Rot, || Rot(13));
crate::register!(dyn Codec, "rot", Rot, |shift: u8| Rot(shift));
crate::register_extra!(dyn Codec, "plain", Identity, || Identity);
