pub mod apikey;
