//! Shared cw-multi-test harness: a mock transport router, a CW20 token,
//! bridge instances wired to them and a bank that can refuse deposits.

#![allow(dead_code)]

use common::{FeeResponse, InboundMessage, TransportMessage, MESSAGE_ID_ATTRIBUTE};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::testing::{MockApi, MockStorage};
use cosmwasm_std::{
    coins, to_json_binary, Addr, Api, BankMsg, BankQuery, Binary, BlockInfo, Coin, CustomMsg,
    CustomQuery, Deps, DepsMut, Empty, Env, MessageInfo, Querier, Response, StdError, StdResult,
    Storage, Uint128, WasmMsg,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse};
use cw_multi_test::error::{bail, AnyResult};
use cw_multi_test::{
    App, AppBuilder, AppResponse, Bank, BankKeeper, BankSudo, Contract, ContractWrapper,
    CosmosRouter, DistributionKeeper, Executor, FailingModule, GovFailingModule,
    IbcFailingModule, Module, StakeKeeper, StargateFailingModule, WasmKeeper,
};
use cw_storage_plus::Item;
use serde::de::DeserializeOwned;

use token_bridge::chain_registry::ChainSetup;
use token_bridge::msg::{ExecuteMsg, InstantiateMsg};
use token_bridge::rate_limiter::RateLimitConfig;

pub const FEE_DENOM: &str = "uluna";
pub const ROUTER_FEE: u128 = 1_000;
pub const INITIAL_NATIVE: u128 = 10_000_000_000;

pub const HOME_SELECTOR: u64 = 1;
pub const REMOTE_SELECTOR: u64 = 7;
pub const CUSTOM_HOME_SELECTOR: u64 = 11;
pub const CUSTOM_REMOTE_SELECTOR: u64 = 17;
pub const CUSTOM_FEE: u128 = 500;

/// Second native denom held by the user, never accepted by the bridge
pub const OTHER_DENOM: &str = "uusd";

/// Funded account whose incoming bank sends always fail
pub const REJECTING_ACCOUNT: &str = "terra1rejecting";

// ============================================================================
// Bank
// ============================================================================

/// `BankKeeper` that refuses `BankMsg::Send` to a fixed set of accounts,
/// like a chain's blocked module addresses.
pub struct RejectingBank {
    inner: BankKeeper,
    rejected: Vec<Addr>,
}

impl RejectingBank {
    pub fn new(rejected: Vec<Addr>) -> Self {
        Self {
            inner: BankKeeper::new(),
            rejected,
        }
    }

    pub fn init_balance(
        &self,
        storage: &mut dyn Storage,
        account: &Addr,
        amount: Vec<Coin>,
    ) -> AnyResult<()> {
        self.inner.init_balance(storage, account, amount)
    }
}

impl Bank for RejectingBank {}

impl Module for RejectingBank {
    type ExecT = BankMsg;
    type QueryT = BankQuery;
    type SudoT = BankSudo;

    fn execute<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        sender: Addr,
        msg: BankMsg,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        if let BankMsg::Send { to_address, .. } = &msg {
            if self.rejected.iter().any(|addr| addr.as_str() == to_address) {
                bail!("account {} does not accept funds", to_address);
            }
        }
        self.inner.execute(api, storage, router, block, sender, msg)
    }

    fn query(
        &self,
        api: &dyn Api,
        storage: &dyn Storage,
        querier: &dyn Querier,
        block: &BlockInfo,
        request: BankQuery,
    ) -> AnyResult<Binary> {
        self.inner.query(api, storage, querier, block, request)
    }

    fn sudo<ExecC, QueryC>(
        &self,
        api: &dyn Api,
        storage: &mut dyn Storage,
        router: &dyn CosmosRouter<ExecC = ExecC, QueryC = QueryC>,
        block: &BlockInfo,
        msg: BankSudo,
    ) -> AnyResult<AppResponse>
    where
        ExecC: CustomMsg + DeserializeOwned + 'static,
        QueryC: CustomQuery + DeserializeOwned + 'static,
    {
        self.inner.sudo(api, storage, router, block, msg)
    }
}

pub type BridgeApp = App<
    RejectingBank,
    MockApi,
    MockStorage,
    FailingModule<Empty, Empty, Empty>,
    WasmKeeper<Empty, Empty>,
    StakeKeeper,
    DistributionKeeper,
    IbcFailingModule,
    GovFailingModule,
    StargateFailingModule,
>;

// ============================================================================
// Mock Router
// ============================================================================

#[cw_serde]
pub struct RouterInstantiateMsg {
    pub fee: Uint128,
    pub fee_denom: String,
}

#[cw_serde]
pub enum RouterExecuteMsg {
    /// Same shape as the bridge's dispatch message
    Send {
        dest_chain_selector: u64,
        message: TransportMessage,
    },
    SetFee {
        fee: Uint128,
    },
    /// Deliver a message to a bridge as the router
    Deliver {
        bridge: String,
        message: InboundMessage,
    },
}

#[cw_serde]
pub enum RouterQueryMsg {
    GetFee {
        dest_chain_selector: u64,
        message: TransportMessage,
    },
    LastSent {},
}

#[cw_serde]
pub struct SentMessage {
    pub message_id: String,
    pub dest_chain_selector: u64,
    pub sender: Addr,
    pub message: TransportMessage,
}

const ROUTER_FEE_ITEM: Item<(Uint128, String)> = Item::new("fee");
const ROUTER_COUNTER: Item<u64> = Item::new("counter");
const ROUTER_LAST_SENT: Item<SentMessage> = Item::new("last_sent");

fn router_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: RouterInstantiateMsg,
) -> StdResult<Response> {
    ROUTER_FEE_ITEM.save(deps.storage, &(msg.fee, msg.fee_denom))?;
    ROUTER_COUNTER.save(deps.storage, &0)?;
    Ok(Response::new())
}

fn router_execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: RouterExecuteMsg,
) -> StdResult<Response> {
    match msg {
        RouterExecuteMsg::Send {
            dest_chain_selector,
            message,
        } => {
            let (fee, denom) = ROUTER_FEE_ITEM.load(deps.storage)?;
            let paid = info
                .funds
                .iter()
                .find(|c| c.denom == denom)
                .map(|c| c.amount)
                .unwrap_or_default();
            if paid < fee {
                return Err(StdError::generic_err("insufficient router fee"));
            }

            let counter = ROUTER_COUNTER.load(deps.storage)? + 1;
            ROUTER_COUNTER.save(deps.storage, &counter)?;
            let message_id = format!("0x{:064x}", counter);
            ROUTER_LAST_SENT.save(
                deps.storage,
                &SentMessage {
                    message_id: message_id.clone(),
                    dest_chain_selector,
                    sender: info.sender,
                    message,
                },
            )?;
            Ok(Response::new().add_attribute(MESSAGE_ID_ATTRIBUTE, message_id))
        }
        RouterExecuteMsg::SetFee { fee } => {
            ROUTER_FEE_ITEM.update(deps.storage, |(_, denom)| -> StdResult<_> {
                Ok((fee, denom))
            })?;
            Ok(Response::new())
        }
        RouterExecuteMsg::Deliver { bridge, message } => Ok(Response::new().add_message(
            WasmMsg::Execute {
                contract_addr: bridge,
                msg: to_json_binary(&ExecuteMsg::ReceiveMessage(message))?,
                funds: vec![],
            },
        )),
    }
}

fn router_query(deps: Deps, _env: Env, msg: RouterQueryMsg) -> StdResult<Binary> {
    match msg {
        RouterQueryMsg::GetFee { .. } => {
            let (fee, _) = ROUTER_FEE_ITEM.load(deps.storage)?;
            to_json_binary(&FeeResponse { fee })
        }
        RouterQueryMsg::LastSent {} => to_json_binary(&ROUTER_LAST_SENT.load(deps.storage)?),
    }
}

fn contract_router() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        router_execute,
        router_instantiate,
        router_query,
    ))
}

// ============================================================================
// Contracts
// ============================================================================

fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        token_bridge::contract::execute,
        token_bridge::contract::instantiate,
        token_bridge::contract::query,
    )
    .with_reply(token_bridge::contract::reply);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Environment
// ============================================================================

/// One side of the bridge: a token and the bridge instance that moves it
pub struct Side {
    pub token: Addr,
    pub bridge: Addr,
}

pub struct TestEnv {
    pub app: BridgeApp,
    pub owner: Addr,
    pub timelock: Addr,
    pub user: Addr,
    pub router: Addr,
    /// Home chain instance (lock/release)
    pub home: Side,
    /// Remote chain instance (burn/mint)
    pub remote: Side,
}

pub fn limits(capacity: u128, rate: u128) -> RateLimitConfig {
    RateLimitConfig {
        capacity: Uint128::new(capacity),
        rate: Uint128::new(rate),
        is_disabled: false,
    }
}

fn instantiate_token(app: &mut BridgeApp, code_id: u64, minter: &Addr, holder: &Addr) -> Addr {
    app.instantiate_contract(
        code_id,
        minter.clone(),
        &cw20_base::msg::InstantiateMsg {
            name: "Bridged Token".to_string(),
            symbol: "BTKN".to_string(),
            decimals: 6,
            initial_balances: vec![Cw20Coin {
                address: holder.to_string(),
                amount: Uint128::new(1_000_000),
            }],
            mint: Some(MinterResponse {
                minter: minter.to_string(),
                cap: None,
            }),
            marketing: None,
        },
        &[],
        "token",
        None,
    )
    .unwrap()
}

#[allow(clippy::too_many_arguments)]
fn instantiate_bridge(
    app: &mut BridgeApp,
    code_id: u64,
    owner: &Addr,
    timelock: &Addr,
    token: &Addr,
    router: &Addr,
    is_home_chain: bool,
    rate_limit: RateLimitConfig,
) -> Addr {
    app.instantiate_contract(
        code_id,
        owner.clone(),
        &InstantiateMsg {
            owner: owner.to_string(),
            timelock_owner: timelock.to_string(),
            token: token.to_string(),
            router: router.to_string(),
            fee_denom: FEE_DENOM.to_string(),
            is_home_chain,
            inbound_rate_limit: rate_limit.clone(),
            outbound_rate_limit: rate_limit,
        },
        &[],
        "token-bridge",
        Some(owner.to_string()),
    )
    .unwrap()
}

/// Home and remote bridges on one app, registered with each other over
/// both the transport and the custom path.
pub fn setup() -> TestEnv {
    setup_with_limits(limits(1_000_000, 100))
}

pub fn setup_with_limits(rate_limit: RateLimitConfig) -> TestEnv {
    let owner = Addr::unchecked("terra1owner");
    let timelock = Addr::unchecked("terra1timelock");
    let user = Addr::unchecked("terra1user");
    let rejecting = Addr::unchecked(REJECTING_ACCOUNT);

    let mut app = AppBuilder::new()
        .with_bank(RejectingBank::new(vec![rejecting.clone()]))
        .build(|router, _, storage| {
            router
                .bank
                .init_balance(
                    storage,
                    &user,
                    vec![
                        Coin::new(INITIAL_NATIVE, FEE_DENOM),
                        Coin::new(INITIAL_NATIVE, OTHER_DENOM),
                    ],
                )
                .unwrap();
            router
                .bank
                .init_balance(storage, &rejecting, coins(INITIAL_NATIVE, FEE_DENOM))
                .unwrap();
        });

    let router_code = app.store_code(contract_router());
    let cw20_code = app.store_code(contract_cw20());
    let bridge_code = app.store_code(contract_bridge());

    let router = app
        .instantiate_contract(
            router_code,
            owner.clone(),
            &RouterInstantiateMsg {
                fee: Uint128::new(ROUTER_FEE),
                fee_denom: FEE_DENOM.to_string(),
            },
            &[],
            "router",
            None,
        )
        .unwrap();

    let home_token = instantiate_token(&mut app, cw20_code, &owner, &user);
    let remote_token = instantiate_token(&mut app, cw20_code, &owner, &user);

    let home_bridge = instantiate_bridge(
        &mut app,
        bridge_code,
        &owner,
        &timelock,
        &home_token,
        &router,
        true,
        rate_limit.clone(),
    );
    let remote_bridge = instantiate_bridge(
        &mut app,
        bridge_code,
        &owner,
        &timelock,
        &remote_token,
        &router,
        false,
        rate_limit,
    );

    // The remote bridge mints on settlement
    app.execute_contract(
        owner.clone(),
        remote_token.clone(),
        &Cw20ExecuteMsg::UpdateMinter {
            new_minter: Some(remote_bridge.to_string()),
        },
        &[],
    )
    .unwrap();

    let mut env = TestEnv {
        app,
        owner,
        timelock,
        user,
        router,
        home: Side {
            token: home_token,
            bridge: home_bridge,
        },
        remote: Side {
            token: remote_token,
            bridge: remote_bridge,
        },
    };

    let home_bridge = env.home.bridge.clone();
    let remote_bridge = env.remote.bridge.clone();
    env.setup_chains(
        &home_bridge,
        vec![
            chain_setup(REMOTE_SELECTOR, &remote_bridge, 0, true, true, false),
            chain_setup(CUSTOM_REMOTE_SELECTOR, &remote_bridge, CUSTOM_FEE, true, true, true),
        ],
    );
    env.setup_chains(
        &remote_bridge,
        vec![
            chain_setup(HOME_SELECTOR, &home_bridge, 0, true, true, false),
            chain_setup(CUSTOM_HOME_SELECTOR, &home_bridge, CUSTOM_FEE, true, true, true),
        ],
    );
    env
}

pub fn chain_setup(
    chain_selector: u64,
    bridge: &Addr,
    fees: u128,
    is_source: bool,
    is_destination: bool,
    is_custom: bool,
) -> ChainSetup {
    ChainSetup {
        chain_selector,
        bridge_address: endpoint(bridge),
        fees: Uint128::new(fees),
        is_source,
        is_destination,
        is_custom,
    }
}

/// Endpoint identifier of a bridge as registered on the other side.
pub fn endpoint(bridge: &Addr) -> Binary {
    Binary::from(bridge.as_bytes())
}

impl TestEnv {
    pub fn setup_chains(&mut self, bridge: &Addr, chains: Vec<ChainSetup>) {
        self.app
            .execute_contract(
                self.owner.clone(),
                bridge.clone(),
                &ExecuteMsg::SetupChains { chains },
                &[],
            )
            .unwrap();
    }

    pub fn approve(&mut self, token: &Addr, spender: &Addr, amount: u128) {
        self.app
            .execute_contract(
                self.user.clone(),
                token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: spender.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn fund_cw20(&mut self, token: &Addr, to: &Addr, amount: u128) {
        self.app
            .execute_contract(
                self.user.clone(),
                token.clone(),
                &Cw20ExecuteMsg::Transfer {
                    recipient: to.to_string(),
                    amount: Uint128::new(amount),
                },
                &[],
            )
            .unwrap();
    }

    pub fn cw20_balance(&self, token: &Addr, account: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn native_balance(&self, account: &Addr) -> u128 {
        self.denom_balance(account, FEE_DENOM)
    }

    pub fn denom_balance(&self, account: &Addr, denom: &str) -> u128 {
        self.app
            .wrap()
            .query_balance(account, denom)
            .unwrap()
            .amount
            .u128()
    }

    pub fn total_supply(&self, token: &Addr) -> u128 {
        let res: cw20::TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply.u128()
    }

    pub fn last_sent(&self) -> SentMessage {
        self.app
            .wrap()
            .query_wasm_smart(&self.router, &RouterQueryMsg::LastSent {})
            .unwrap()
    }

    pub fn advance_seconds(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += seconds / 5;
        });
    }
}

// ============================================================================
// Event Helpers
// ============================================================================

/// Value of the first `key` attribute in a wasm event carrying `action`.
pub fn event_attr(res: &AppResponse, action: &str, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .find(|e| {
            e.attributes
                .iter()
                .any(|a| a.key == "action" && a.value == action)
        })
        .and_then(|e| e.attributes.iter().find(|a| a.key == key))
        .map(|a| a.value.clone())
}

pub fn has_action(res: &AppResponse, action: &str) -> bool {
    res.events.iter().any(|e| {
        e.ty == "wasm"
            && e.attributes
                .iter()
                .any(|a| a.key == "action" && a.value == action)
    })
}
