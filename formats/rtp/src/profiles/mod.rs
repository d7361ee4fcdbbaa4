pub mod avp;
