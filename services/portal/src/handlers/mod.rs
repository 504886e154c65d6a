pub mod portal_user;
