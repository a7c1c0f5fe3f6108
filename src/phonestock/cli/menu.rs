//! The interactive menu: the shop's day-to-day front end.
//!
//! Each option runs to completion or fails with a message; either way control
//! returns to the main menu. Option `0` and end of input leave the loop.

use super::print::{render_result, style_message};
use super::prompt::{parse_whole, Prompter};
use phonestock::api::{CmdMessage, CmdResult, StockApi};
use phonestock::config::StockConfig;
use phonestock::error::{Result, StockError};
use phonestock::model::{
    Direction, Field, StockKey, MAX_QUANTITY, MAX_RELEASE_YEAR, MIN_RELEASE_YEAR, STORAGE_OPTIONS,
};
use phonestock::payment::{parse_amount, Approval, CardDetails, Quote};
use phonestock::store::DataStore;
use phonestock::validation::{self, NewRecord};
use std::io::{BufRead, Write};
use tracing::debug;

const MAIN_MENU: &str = "
1 - Browse phones
2 - Add a phone
3 - Update stock
4 - Update price
5 - Phones within a budget
6 - Sell a phone
0 - Exit";

pub fn run<S, R, W>(
    api: &mut StockApi<S>,
    config: &StockConfig,
    prompter: Prompter<R, W>,
) -> Result<()>
where
    S: DataStore,
    R: BufRead,
    W: Write,
{
    let mut menu = Menu {
        api,
        config,
        prompter,
    };
    menu.run()
}

struct Menu<'a, S: DataStore, R, W> {
    api: &'a mut StockApi<S>,
    config: &'a StockConfig,
    prompter: Prompter<R, W>,
}

impl<S: DataStore, R: BufRead, W: Write> Menu<'_, S, R, W> {
    fn run(&mut self) -> Result<()> {
        loop {
            self.prompter.say(MAIN_MENU)?;
            let choice = match self.prompter.ask_number("Choose an option: ", 0u8, 6) {
                Ok(choice) => choice,
                Err(StockError::InputClosed) => return Ok(()),
                Err(e) => return Err(e),
            };

            let outcome = match choice {
                0 => {
                    self.prompter.say("Goodbye.")?;
                    return Ok(());
                }
                1 => self.browse(),
                2 => self.add(),
                3 => self.update_stock(),
                4 => self.update_price(),
                5 => self.budget(),
                _ => self.sell(),
            };

            match outcome {
                Ok(()) => {}
                Err(StockError::InputClosed) => return Ok(()),
                Err(e) => {
                    debug!(option = choice, error = %e, "menu option failed");
                    self.tell(&CmdMessage::error(e.to_string()))?;
                }
            }
        }
    }

    fn browse(&mut self) -> Result<()> {
        if self.api.inventory().is_empty() {
            return self.tell(&CmdMessage::info("There are no phones in stock."));
        }
        let brands = self.api.index_by(Field::Brand);
        let brand = self.prompter.choose("Brands:", &brands)?;
        let sizes = self.api.index_by(Field::Storage);
        let storage = self.prompter.choose("Storage (GB):", &sizes)?;

        let result = self.api.browse(&brand, &storage);
        self.show(&result)
    }

    fn add(&mut self) -> Result<()> {
        self.api.ensure_writable()?;
        let p = &mut self.prompter;
        let brand = p.ask_valid("Brand: ", validation::validate_brand)?;
        let model = p.ask_valid("Model: ", validation::validate_model)?;
        let quantity = p.ask_valid(
            &format!("Quantity (1-{}): ", MAX_QUANTITY),
            validation::validate_quantity,
        )?;
        let price = p.ask_valid("Price: ", validation::validate_price)?;
        let storage = p.ask_valid(
            &format!("Storage in GB ({}): ", STORAGE_OPTIONS.join(", ")),
            validation::validate_storage,
        )?;
        let year = p.ask_valid(
            &format!("Release year ({}-{}): ", MIN_RELEASE_YEAR, MAX_RELEASE_YEAR),
            validation::validate_release_year,
        )?;

        let record = NewRecord::parse(&brand, &model, &quantity, &price, &storage, &year)?;
        let result = self.api.append_record(record)?;
        self.show(&result)
    }

    fn ask_key(&mut self) -> Result<StockKey> {
        let brand = validation::normalize_brand(&self.prompter.ask("Brand: ")?);
        let model = self.prompter.ask("Model: ")?.trim().to_string();
        let storage = self.prompter.ask("Storage (GB): ")?.trim().to_string();
        Ok(StockKey::new(brand, model, storage))
    }

    fn update_stock(&mut self) -> Result<()> {
        self.api.ensure_writable()?;
        let key = self.ask_key()?;
        let current = self.api.find(&key)?.quantity;
        self.prompter
            .say(format!("{} has {} units in stock", key, current))?;

        loop {
            let direction: Direction = self
                .prompter
                .ask_parsed("Add (+) or remove (-)? ", str::parse::<Direction>)?;
            let amount = self.prompter.ask_parsed("How many? ", parse_whole::<u32>)?;
            match self.api.adjust_stock(&key, direction, amount) {
                Ok(result) => return self.show(&result),
                Err(StockError::OutOfBounds(reason)) => self.prompter.say(format!("  {}", reason))?,
                Err(e) => return Err(e),
            }
        }
    }

    fn update_price(&mut self) -> Result<()> {
        self.api.ensure_writable()?;
        let key = self.ask_key()?;
        let current = self.api.find(&key)?.price;
        self.prompter
            .say(format!("{} sells for {}", key, self.config.price(current)))?;

        loop {
            let price = self.prompter.ask_parsed("New price: ", parse_whole::<i64>)?;
            match self.api.adjust_price(&key, price) {
                Ok(result) => return self.show(&result),
                Err(StockError::OutOfBounds(reason)) => self.prompter.say(format!("  {}", reason))?,
                Err(e) => return Err(e),
            }
        }
    }

    fn budget(&mut self) -> Result<()> {
        let ceiling = self.prompter.ask_parsed("Budget: ", |answer| {
            parse_whole::<u32>(answer).and_then(|ceiling| match ceiling {
                0 => Err("The budget must be greater than 0".to_string()),
                _ => Ok(ceiling),
            })
        })?;
        let brand = self.prompter.ask("Brand: ")?;

        let result = self.api.filter_by_budget(ceiling, &brand);
        self.show(&result)
    }

    fn sell(&mut self) -> Result<()> {
        self.api.ensure_writable()?;
        if self.api.inventory().is_empty() {
            return self.tell(&CmdMessage::info("There are no phones in stock."));
        }
        let brands = self.api.index_by(Field::Brand);
        let brand = self.prompter.choose("Brands:", &brands)?;
        let sizes = self.api.index_by(Field::Storage);
        let storage = self.prompter.choose("Storage (GB):", &sizes)?;

        let models = self.api.models_for(&brand, &storage);
        if models.is_empty() {
            return self.tell(&CmdMessage::info(format!(
                "No {} phones with {}GB",
                brand, storage
            )));
        }
        let model = self.prompter.choose("Models:", &models)?;

        let quote = self.api.quote(&StockKey::new(brand, model, storage))?;
        self.prompter.say(format!(
            "{} costs {}",
            quote.key(),
            self.config.price(quote.price())
        ))?;

        let method = self.prompter.ask("Pay by cash or card? ")?;
        let approval = match method.trim().to_lowercase().as_str() {
            "cash" | "efectivo" => self.pay_cash(&quote)?,
            "card" | "tarjeta" => self.pay_card(&quote)?,
            other => {
                return self.tell(&CmdMessage::warning(format!(
                    "Unknown payment method {:?}; nothing was sold",
                    other
                )))
            }
        };

        let result = self.api.purchase(approval)?;
        self.show(&result)
    }

    fn pay_cash(&mut self, quote: &Quote) -> Result<Approval> {
        loop {
            let tendered = self.prompter.ask_parsed("Amount tendered: ", parse_amount)?;
            match quote.pay_cash(tendered) {
                Ok(approval) => return Ok(approval),
                Err(e) => self.prompter.say(format!("  {}", e))?,
            }
        }
    }

    fn pay_card(&mut self, quote: &Quote) -> Result<Approval> {
        loop {
            let card = CardDetails {
                number: self.prompter.ask("Card number: ")?,
                security_code: self.prompter.ask("Security code: ")?,
                national_id: self.prompter.ask("National ID: ")?,
            };
            match quote.pay_card(&card) {
                Ok(approval) => return Ok(approval),
                Err(e) => self.prompter.say(format!("  {}", e))?,
            }
        }
    }

    fn show(&mut self, result: &CmdResult) -> Result<()> {
        let text = render_result(result, self.config);
        write!(self.prompter.output(), "{}", text)?;
        Ok(())
    }

    fn tell(&mut self, message: &CmdMessage) -> Result<()> {
        self.prompter.say(style_message(message))
    }
}
