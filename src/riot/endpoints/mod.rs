mod account;
mod league;
mod summoner;
