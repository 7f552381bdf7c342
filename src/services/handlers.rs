use crate::{
	adapters::repositories::{Repository, TRepository},
	database::SharedExecutor,
	domain::{
		feed::{FeedEntry, UNKNOWN_AUTHOR},
		follow::Follow,
		list::QuackList,
		quack::{
			entity::{Quack, Requack},
			extract_hashtags,
		},
		user::{
			entity::{NewUser, User},
			parse_user_id, required,
		},
	},
};

use super::{
	allocator::IdAllocator,
	feed::compose_feed,
	pagination::PaginationController,
	response::{FeedPage, FollowOutcome, NotFound, Profile, QuackDetail, RequackOutcome, ResultPage, ServiceError},
	session::Session,
	validator::{validate_follow, validate_requack},
};

/// Entry points the terminal front end calls. Every call takes the session
/// explicitly and runs as one sequential chain of store statements.
pub struct PondHandler;
impl PondHandler {
	/// Registers a user and logs the session in as them.
	pub async fn sign_up(
		name: &str,
		email: &str,
		phone: &str,
		password: &str,
		session: &mut Session,
		executor: &SharedExecutor,
	) -> Result<i32, ServiceError> {
		let new_user = NewUser::parse(name, email, phone, password)?;

		let users = Repository::<User>::new(executor.clone());
		let id = IdAllocator::default().allocate(users.existing_ids().await?)?;
		users.insert(id, &new_user).await?;

		tracing::info!("User {id} signed up");
		session.log_in(id);
		Ok(id)
	}

	pub async fn log_in(
		user_id: &str,
		password: &str,
		session: &mut Session,
		executor: &SharedExecutor,
	) -> Result<i32, ServiceError> {
		let user_id = parse_user_id(user_id)?;
		let found = Repository::<User>::new(executor.clone()).find_by_credentials(user_id, password).await?;

		match found {
			Some(id) => {
				tracing::info!("User {id} logged in");
				session.log_in(id);
				Ok(id)
			}
			None => {
				tracing::warn!("Rejected credentials for user {user_id}");
				Err(NotFound::Credentials.into())
			}
		}
	}

	pub fn log_out(session: &mut Session) {
		if let Some(id) = session.user_id {
			tracing::info!("User {id} logged out");
		}
		session.log_out();
	}

	pub async fn post(
		text: &str,
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<Quack, ServiceError> {
		let author_id = session.user_id()?;
		let quack = Self::write_quack(author_id, text, None, executor).await?;
		tracing::info!("User {author_id} posted quack {}", quack.id);
		Ok(quack)
	}

	pub async fn reply(
		parent_id: i32,
		text: &str,
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<Quack, ServiceError> {
		let author_id = session.user_id()?;
		Self::existing_quack(parent_id, executor).await?;
		let quack = Self::write_quack(author_id, text, Some(parent_id), executor).await?;
		tracing::info!("User {author_id} replied to {parent_id} with {}", quack.id);
		Ok(quack)
	}

	/// A repeat requack is written as spam and reported as such; only a
	/// store failure is an error.
	pub async fn requack(
		quack_id: i32,
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<RequackOutcome, ServiceError> {
		let user_id = session.user_id()?;
		Self::existing_quack(quack_id, executor).await?;

		let requacks = Repository::<Requack>::new(executor.clone());
		let earlier = requacks.by_user_on_quack(user_id, quack_id).await?;
		let outcome = validate_requack(user_id, quack_id, &earlier);
		requacks.insert(user_id, quack_id, outcome == RequackOutcome::MarkedSpam).await?;

		match outcome {
			RequackOutcome::Created => tracing::info!("User {user_id} requacked {quack_id}"),
			RequackOutcome::MarkedSpam => tracing::warn!("User {user_id} requacked {quack_id} again, marked as spam"),
		}
		Ok(outcome)
	}

	pub async fn follow(
		followee_id: i32,
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<FollowOutcome, ServiceError> {
		let follower_id = session.user_id()?;
		if Repository::<User>::new(executor.clone()).get(followee_id).await?.is_none() {
			return Err(NotFound::User(followee_id).into());
		}

		let follows = Repository::<Follow>::new(executor.clone());
		let outcome = validate_follow(follower_id, followee_id, &follows.followees(follower_id).await?);
		match outcome {
			FollowOutcome::Ok => {
				follows.insert(follower_id, followee_id).await?;
				tracing::info!("User {follower_id} now follows {followee_id}");
			}
			rejected => tracing::warn!("Follow {follower_id} -> {followee_id} rejected: {rejected:?}"),
		}
		Ok(outcome)
	}

	/// `false` when the session user was not following `followee_id`.
	pub async fn unfollow(
		followee_id: i32,
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<bool, ServiceError> {
		let follower_id = session.user_id()?;
		let removed = Repository::<Follow>::new(executor.clone()).delete(follower_id, followee_id).await?;
		if removed {
			tracing::info!("User {follower_id} unfollowed {followee_id}");
		}
		Ok(removed)
	}

	/// The full feed of `viewer_id`, newest first.
	pub async fn compose_feed(
		viewer_id: i32,
		executor: &SharedExecutor,
	) -> Result<Vec<FeedEntry>, ServiceError> {
		let rows = Repository::<FeedEntry>::new(executor.clone()).raw_rows(viewer_id).await?;
		Ok(compose_feed(rows))
	}

	/// Composes the session user's feed and windows it with the session's
	/// display count. The visible entries are remembered for `select_feed_entry`.
	pub async fn feed_page(
		session: &mut Session,
		executor: &SharedExecutor,
	) -> Result<FeedPage, ServiceError> {
		let viewer_id = session.user_id()?;
		let feed = Self::compose_feed(viewer_id, executor).await?;
		let window = session.feed.apply(feed.len());

		let page = window.page();
		let entries = feed[page.clone()].to_vec();
		session.displayed = entries.clone();
		session.displayed_from = page.start + 1;

		Ok(FeedPage {
			first_position: page.start + 1,
			entries,
			total: feed.len(),
			message: window.message,
		})
	}

	/// Resolves a 1-based feed position from the last `feed_page` to its quack.
	pub async fn select_feed_entry(
		position: usize,
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<Quack, ServiceError> {
		let entry = session.displayed_entry(position).ok_or(NotFound::FeedEntry(position))?;
		Self::existing_quack(entry.post_id, executor).await
	}

	/// Users whose name contains `term`, windowed by `session.results`.
	pub async fn search_users(
		term: &str,
		session: &mut Session,
		executor: &SharedExecutor,
	) -> Result<ResultPage<User>, ServiceError> {
		let term = required(term, "search term")?;
		let users = Repository::<User>::new(executor.clone()).search_by_name(&term).await?;
		Ok(paged(users, &mut session.results))
	}

	/// Quacks matching `term`, windowed by `session.results`.
	pub async fn search_quacks(
		term: &str,
		session: &mut Session,
		executor: &SharedExecutor,
	) -> Result<ResultPage<Quack>, ServiceError> {
		let term = required(term, "search term")?;
		let quacks = Repository::<Quack>::new(executor.clone()).search(&term).await?;
		Ok(paged(quacks, &mut session.results))
	}

	/// A user's profile with the page of their quacks selected by `session.profile`.
	pub async fn profile(
		user_id: i32,
		session: &mut Session,
		executor: &SharedExecutor,
	) -> Result<Profile, ServiceError> {
		let users = Repository::<User>::new(executor.clone());
		let user = users.get(user_id).await?.ok_or(NotFound::User(user_id))?;
		let summary = users.summary(user_id).await?;

		let quacks = Repository::<Quack>::new(executor.clone()).by_author(user_id).await?;
		let window = session.profile.apply(quacks.len());
		let page = window.page();

		Ok(Profile {
			user,
			summary,
			first_position: page.start + 1,
			quacks: quacks[page].to_vec(),
			message: window.message,
		})
	}

	pub async fn quack_detail(
		quack_id: i32,
		executor: &SharedExecutor,
	) -> Result<QuackDetail, ServiceError> {
		let quack = Self::existing_quack(quack_id, executor).await?;
		let author_name = Repository::<User>::new(executor.clone())
			.username(quack.author_id)
			.await?
			.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
		let requack_count = Repository::<Requack>::new(executor.clone()).count(quack_id).await?;
		let replies = Repository::<Quack>::new(executor.clone()).replies(quack_id).await?;

		Ok(QuackDetail {
			quack,
			author_name,
			requack_count,
			replies,
		})
	}

	/// Who follows the session user, windowed by `session.results`.
	pub async fn followers(
		session: &mut Session,
		executor: &SharedExecutor,
	) -> Result<ResultPage<User>, ServiceError> {
		let user_id = session.user_id()?;
		let followers = Repository::<Follow>::new(executor.clone()).followers(user_id).await?;
		Ok(paged(followers, &mut session.results))
	}

	/// `false` when the session user already has a list of that name.
	pub async fn create_list(
		name: &str,
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<bool, ServiceError> {
		let owner_id = session.user_id()?;
		let name = required(name, "list name")?;
		Repository::<QuackList>::new(executor.clone()).create(owner_id, &name).await
	}

	/// Adds a quack to one of the session user's existing lists.
	pub async fn add_to_list(
		name: &str,
		quack_id: i32,
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<bool, ServiceError> {
		let owner_id = session.user_id()?;
		let lists = Repository::<QuackList>::new(executor.clone());
		if !lists.exists(owner_id, name).await? {
			return Err(NotFound::List(name.to_string()).into());
		}
		Self::existing_quack(quack_id, executor).await?;
		lists.add(owner_id, name, quack_id).await
	}

	pub async fn lists(
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<Vec<QuackList>, ServiceError> {
		let owner_id = session.user_id()?;
		Repository::<QuackList>::new(executor.clone()).of_owner(owner_id).await
	}

	pub async fn list_quacks(
		name: &str,
		session: &Session,
		executor: &SharedExecutor,
	) -> Result<Vec<Quack>, ServiceError> {
		let owner_id = session.user_id()?;
		let lists = Repository::<QuackList>::new(executor.clone());
		if !lists.exists(owner_id, name).await? {
			return Err(NotFound::List(name.to_string()).into());
		}
		lists.quacks(owner_id, name).await
	}

	async fn write_quack(
		author_id: i32,
		text: &str,
		reply_to_id: Option<i32>,
		executor: &SharedExecutor,
	) -> Result<Quack, ServiceError> {
		let text = required(text, "quack text")?;
		let hashtags = extract_hashtags(&text)?;

		let quacks = Repository::<Quack>::new(executor.clone());
		let id = IdAllocator::default().allocate(quacks.existing_ids().await?)?;
		quacks.insert(id, author_id, &text, reply_to_id, &hashtags).await
	}

	async fn existing_quack(
		quack_id: i32,
		executor: &SharedExecutor,
	) -> Result<Quack, ServiceError> {
		Repository::<Quack>::new(executor.clone()).get(quack_id).await?.ok_or_else(|| NotFound::Quack(quack_id).into())
	}
}

fn paged<T>(
	mut items: Vec<T>,
	browsing: &mut PaginationController,
) -> ResultPage<T> {
	let total = items.len();
	let window = browsing.apply(total);
	let page = window.page();
	items.truncate(page.end);

	ResultPage {
		first_position: page.start + 1,
		items: items.split_off(page.start),
		total,
		message: window.message,
	}
}

#[cfg(test)]
mod test {
	use super::PondHandler;
	use crate::{
		config::Config,
		database::{DatabaseExecutor, SharedExecutor},
		domain::feed::FeedKind,
		services::{
			pagination::PageMessage,
			response::{FollowOutcome, NotFound, RequackOutcome, ServiceError, ValidationError},
			session::Session,
		},
	};

	async fn set_up() -> SharedExecutor {
		DatabaseExecutor::in_memory().await.unwrap().into()
	}

	async fn sign_up(
		name: &str,
		executor: &SharedExecutor,
	) -> Session {
		let mut session = Session::new(&Config::default());
		let email = format!("{}@pond.org", name.to_lowercase());
		PondHandler::sign_up(name, &email, "780-555-0199", "quack", &mut session, executor).await.unwrap();
		session
	}

	/// Overwrites the stored date of a quack or requack so ordering can be tested.
	async fn backdate(
		executor: &SharedExecutor,
		sql: &str,
		date: &str,
		time: Option<&str>,
		id: i32,
	) {
		let executor = executor.read().await;
		let mut query = sqlx::query(sql).bind(date);
		if let Some(time) = time {
			query = query.bind(time);
		}
		query.bind(id).execute(executor.connection()).await.unwrap();
	}

	#[tokio::test]
	async fn test_sign_up_allocates_smallest_id_and_logs_in() {
		'_given: {
			let executor = set_up().await;

			'_when: {
				let first = sign_up("Daffy", &executor).await;
				let second = sign_up("Donald", &executor).await;

				assert_eq!(first.user_id, Some(1));
				assert_eq!(second.user_id, Some(2));
			}
		}
	}

	#[tokio::test]
	async fn test_sign_up_rejects_bad_input_before_writing() {
		let executor = set_up().await;
		let mut session = Session::new(&Config::default());

		let result = PondHandler::sign_up("Daffy", "not-an-email", "780-555-0199", "pw", &mut session, &executor).await;
		assert!(matches!(result, Err(ServiceError::Validation(ValidationError::InvalidEmail))));

		let result = PondHandler::sign_up("Daffy", "daffy@pond.org", "555-0199", "pw", &mut session, &executor).await;
		assert!(matches!(result, Err(ServiceError::Validation(ValidationError::InvalidPhone))));

		assert!(!session.is_logged_in());
		assert_eq!(PondHandler::search_users("daffy", &mut session, &executor).await.unwrap().total, 0);
	}

	#[tokio::test]
	async fn test_log_in_and_out() {
		let executor = set_up().await;
		let mut daffy = sign_up("Daffy", &executor).await;
		PondHandler::log_out(&mut daffy);
		assert!(!daffy.is_logged_in());

		let mut session = Session::new(&Config::default());
		let wrong = PondHandler::log_in("1", "duck", &mut session, &executor).await;
		assert!(matches!(wrong, Err(ServiceError::NotFound(NotFound::Credentials))));
		let garbled = PondHandler::log_in("one", "quack", &mut session, &executor).await;
		assert!(matches!(garbled, Err(ServiceError::Validation(ValidationError::InvalidId))));

		assert_eq!(PondHandler::log_in(" 1 ", "quack", &mut session, &executor).await.unwrap(), 1);
		assert_eq!(session.user_id, Some(1));
	}

	#[tokio::test]
	async fn test_actions_require_a_session() {
		let executor = set_up().await;
		let session = Session::new(&Config::default());
		assert!(matches!(PondHandler::post("hello", &session, &executor).await, Err(ServiceError::NotLoggedIn)));
	}

	#[tokio::test]
	async fn test_follow_rules() {
		'_given: {
			let executor = set_up().await;
			let daffy = sign_up("Daffy", &executor).await;
			let _donald = sign_up("Donald", &executor).await;

			'_when: {
				assert_eq!(PondHandler::follow(1, &daffy, &executor).await.unwrap(), FollowOutcome::SelfFollow);
				assert_eq!(PondHandler::follow(2, &daffy, &executor).await.unwrap(), FollowOutcome::Ok);
				assert_eq!(PondHandler::follow(2, &daffy, &executor).await.unwrap(), FollowOutcome::AlreadyFollowing);
				assert!(matches!(PondHandler::follow(42, &daffy, &executor).await, Err(ServiceError::NotFound(NotFound::User(42)))));

				assert!(PondHandler::unfollow(2, &daffy, &executor).await.unwrap());
				assert!(!PondHandler::unfollow(2, &daffy, &executor).await.unwrap());
			}
		}
	}

	#[tokio::test]
	async fn test_followers_and_profile_summary() {
		let executor = set_up().await;
		let mut daffy = sign_up("Daffy", &executor).await;
		let mut donald = sign_up("Donald", &executor).await;
		PondHandler::follow(2, &daffy, &executor).await.unwrap();
		PondHandler::post("first", &donald, &executor).await.unwrap();

		let followers = PondHandler::followers(&mut donald, &executor).await.unwrap();
		assert_eq!(followers.items.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1]);

		let profile = PondHandler::profile(2, &mut daffy, &executor).await.unwrap();
		assert_eq!((profile.summary.followers, profile.summary.followees, profile.summary.quacks), (1, 0, 1));
		assert_eq!(profile.quacks.len(), 1);
	}

	#[tokio::test]
	async fn test_feed_merges_posts_and_reshares() {
		'_given: {
			let executor = set_up().await;
			let viewer = sign_up("Viewer", &executor).await;
			let a = sign_up("Alice", &executor).await;
			let b = sign_up("Bob", &executor).await;
			let c = sign_up("Carol", &executor).await;
			PondHandler::follow(2, &viewer, &executor).await.unwrap();
			PondHandler::follow(3, &viewer, &executor).await.unwrap();

			let old = PondHandler::post("old news from carol", &c, &executor).await.unwrap();
			backdate(&executor, "UPDATE quacks SET qdate = ?, qtime = ? WHERE id = ?", "2023-12-01", Some("09:00:00"), old.id).await;
			let fresh = PondHandler::post("alice says hi", &a, &executor).await.unwrap();
			backdate(&executor, "UPDATE quacks SET qdate = ?, qtime = ? WHERE id = ?", "2024-01-01", Some("10:00:00"), fresh.id).await;
			PondHandler::requack(old.id, &b, &executor).await.unwrap();
			backdate(&executor, "UPDATE requacks SET rdate = ? WHERE quack_id = ?", "2024-01-02", None, old.id).await;

			'_when: {
				let feed = PondHandler::compose_feed(1, &executor).await.unwrap();

				assert_eq!(feed.len(), 2);
				assert_eq!((feed[0].kind, feed[0].post_id, feed[0].origin_user_id), (FeedKind::Reshare, old.id, 3));
				assert_eq!(feed[0].author_name, "Bob");
				assert_eq!(feed[0].text, "old news from carol");
				assert_eq!(feed[0].date, "2024-01-02");
				assert_eq!((feed[1].kind, feed[1].post_id), (FeedKind::Post, fresh.id));

				assert_eq!(feed, PondHandler::compose_feed(1, &executor).await.unwrap());
			}
		}
	}

	#[tokio::test]
	async fn test_duplicate_requack_is_marked_spam() {
		'_given: {
			let executor = set_up().await;
			let viewer = sign_up("Viewer", &executor).await;
			let author = sign_up("Author", &executor).await;
			let resharer = sign_up("Resharer", &executor).await;
			PondHandler::follow(3, &viewer, &executor).await.unwrap();
			let quack = PondHandler::post("worth sharing", &author, &executor).await.unwrap();

			'_when: {
				assert_eq!(PondHandler::requack(quack.id, &resharer, &executor).await.unwrap(), RequackOutcome::Created);
				assert_eq!(PondHandler::requack(quack.id, &resharer, &executor).await.unwrap(), RequackOutcome::MarkedSpam);

				let feed = PondHandler::compose_feed(1, &executor).await.unwrap();
				assert_eq!(feed.iter().filter(|e| e.post_id == quack.id).count(), 1);

				let detail = PondHandler::quack_detail(quack.id, &executor).await.unwrap();
				assert_eq!(detail.requack_count, 1);
				assert_eq!(detail.author_name, "Author");
			}
		}
	}

	#[tokio::test]
	async fn test_requack_of_missing_quack() {
		let executor = set_up().await;
		let daffy = sign_up("Daffy", &executor).await;
		assert!(matches!(PondHandler::requack(77, &daffy, &executor).await, Err(ServiceError::NotFound(NotFound::Quack(77)))));
	}

	#[tokio::test]
	async fn test_replies_share_the_quack_id_space() {
		let executor = set_up().await;
		let daffy = sign_up("Daffy", &executor).await;
		let parent = PondHandler::post("what's up", &daffy, &executor).await.unwrap();
		let first = PondHandler::reply(parent.id, "not much", &daffy, &executor).await.unwrap();
		let second = PondHandler::reply(parent.id, "still nothing", &daffy, &executor).await.unwrap();

		assert_eq!((parent.id, first.id, second.id), (1, 2, 3));
		assert_eq!(first.reply_to_id, Some(parent.id));
		assert!(first.is_reply() && !parent.is_reply());

		let detail = PondHandler::quack_detail(parent.id, &executor).await.unwrap();
		assert_eq!(detail.replies.iter().map(|q| q.id).collect::<Vec<_>>(), vec![2, 3]);

		assert!(matches!(PondHandler::reply(99, "hello?", &daffy, &executor).await, Err(ServiceError::NotFound(NotFound::Quack(99)))));
	}

	#[tokio::test]
	async fn test_hashtags_and_search() {
		'_given: {
			let executor = set_up().await;
			let mut daffy = sign_up("Daffy", &executor).await;
			PondHandler::post("Loving the #Pond today", &daffy, &executor).await.unwrap();
			PondHandler::post("pond water is cold", &daffy, &executor).await.unwrap();
			PondHandler::post("#rust all day", &daffy, &executor).await.unwrap();

			'_when: {
				let duplicate = PondHandler::post("#duck #duck", &daffy, &executor).await;
				assert!(matches!(duplicate, Err(ServiceError::Validation(ValidationError::DuplicateHashtag(_)))));

				let by_tag = PondHandler::search_quacks("#pond", &mut daffy, &executor).await.unwrap();
				assert_eq!(by_tag.items.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1]);

				let by_keyword = PondHandler::search_quacks("POND", &mut daffy, &executor).await.unwrap();
				assert_eq!(by_keyword.total, 2);

				assert!(matches!(
					PondHandler::search_quacks("   ", &mut daffy, &executor).await,
					Err(ServiceError::Validation(ValidationError::EmptyField(_)))
				));
			}
		}
	}

	#[tokio::test]
	async fn test_user_search_shortest_name_first() {
		let executor = set_up().await;
		let mut session = sign_up("Donaldo", &executor).await;
		sign_up("Don", &executor).await;
		sign_up("Daffy", &executor).await;

		let found = PondHandler::search_users("don", &mut session, &executor).await.unwrap();
		assert_eq!(found.items.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(), vec!["Don", "Donaldo"]);
	}

	#[tokio::test]
	async fn test_search_folds_non_ascii_case() {
		'_given: {
			let executor = set_up().await;
			let mut daffy = sign_up("Daffy", &executor).await;
			let mut elodie = Session::new(&Config::default());
			PondHandler::sign_up("Élodie", "elodie@pond.org", "780-555-0123", "quack", &mut elodie, &executor).await.unwrap();
			PondHandler::post("summer in #Église", &daffy, &executor).await.unwrap();

			'_when: {
				for term in ["#église", "#Église", "#ÉGLISE", "ÉGLISE", "église"] {
					let found = PondHandler::search_quacks(term, &mut daffy, &executor).await.unwrap();
					assert_eq!(found.total, 1, "searching {term}");
				}

				let users = PondHandler::search_users("ÉLO", &mut daffy, &executor).await.unwrap();
				assert_eq!(users.items.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(), vec!["Élodie"]);
			}
		}
	}

	#[tokio::test]
	async fn test_search_results_are_paged() {
		'_given: {
			let executor = set_up().await;
			for n in 1..=7 {
				sign_up(&format!("Duck{n}"), &executor).await;
			}
			let config = Config {
				result_page_size: 3,
				..Config::default()
			};
			let mut session = Session::new(&config);

			'_when: {
				let first = PondHandler::search_users("duck", &mut session, &executor).await.unwrap();
				assert_eq!((first.first_position, first.total, first.message), (1, 7, PageMessage::None));
				assert_eq!(first.items.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(), vec!["Duck1", "Duck2", "Duck3"]);

				session.results.more();
				session.results.more();
				let last = PondHandler::search_users("duck", &mut session, &executor).await.unwrap();
				assert_eq!(last.first_position, 5);
				assert_eq!(last.items.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(), vec!["Duck5", "Duck6", "Duck7"]);

				session.results.more();
				let past = PondHandler::search_users("duck", &mut session, &executor).await.unwrap();
				assert_eq!(past.message, PageMessage::NoMore);
				assert_eq!(session.results.count(), 9);

				session.results.reset();
				let again = PondHandler::search_users("duck", &mut session, &executor).await.unwrap();
				assert_eq!(again.items.len(), 3);
			}
		}
	}

	#[tokio::test]
	async fn test_feed_paging_and_selection() {
		'_given: {
			let executor = set_up().await;
			let mut viewer = sign_up("Viewer", &executor).await;
			let author = sign_up("Author", &executor).await;
			PondHandler::follow(2, &viewer, &executor).await.unwrap();
			for n in 1..=12 {
				let quack = PondHandler::post(&format!("quack number {n}"), &author, &executor).await.unwrap();
				backdate(&executor, "UPDATE quacks SET qdate = ?, qtime = ? WHERE id = ?", "2024-01-01", Some(&format!("10:00:{n:02}")), quack.id).await;
			}

			'_when: {
				let page = PondHandler::feed_page(&mut viewer, &executor).await.unwrap();
				assert_eq!((page.first_position, page.entries.len(), page.total), (1, 5, 12));
				assert_eq!(page.entries[0].text, "quack number 12");

				viewer.feed.more();
				viewer.feed.more();
				let page = PondHandler::feed_page(&mut viewer, &executor).await.unwrap();
				assert_eq!((page.first_position, page.entries.len(), page.message), (8, 5, PageMessage::None));

				viewer.feed.more();
				let page = PondHandler::feed_page(&mut viewer, &executor).await.unwrap();
				assert_eq!(page.message, PageMessage::NoMore);
				assert_eq!(viewer.feed.count(), 15);

				let selected = PondHandler::select_feed_entry(12, &viewer, &executor).await.unwrap();
				assert_eq!(selected.text, "quack number 1");
				assert!(matches!(
					PondHandler::select_feed_entry(2, &viewer, &executor).await,
					Err(ServiceError::NotFound(NotFound::FeedEntry(2)))
				));
			}
		}
	}

	#[tokio::test]
	async fn test_lists() {
		let executor = set_up().await;
		let daffy = sign_up("Daffy", &executor).await;
		let quack = PondHandler::post("keep this", &daffy, &executor).await.unwrap();

		let missing = PondHandler::add_to_list("favourites", quack.id, &daffy, &executor).await;
		assert!(matches!(missing, Err(ServiceError::NotFound(NotFound::List(_)))));

		assert!(PondHandler::create_list("favourites", &daffy, &executor).await.unwrap());
		assert!(!PondHandler::create_list("favourites", &daffy, &executor).await.unwrap());
		assert!(PondHandler::add_to_list("favourites", quack.id, &daffy, &executor).await.unwrap());
		assert!(!PondHandler::add_to_list("favourites", quack.id, &daffy, &executor).await.unwrap());

		let listed = PondHandler::list_quacks("favourites", &daffy, &executor).await.unwrap();
		assert_eq!(listed.iter().map(|q| q.id).collect::<Vec<_>>(), vec![quack.id]);
		assert_eq!(PondHandler::lists(&daffy, &executor).await.unwrap().len(), 1);
	}
}
